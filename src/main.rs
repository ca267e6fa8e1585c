use clap::Parser;
use heredity::error::Result;
use heredity::genetics::ProbabilityTables;
use heredity::inference::{Infer, InferenceOptions};
use heredity::observable::PedigreeCsvBuilder;
use heredity::report::{write_report, DEFAULT_PRECISION};
use heredity::Pedigree;
use log::info;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "heredity",
    version,
    about = "Posterior gene and trait probabilities for every person in a pedigree."
)]
struct Args {
    /// Pedigree CSV with name, mother, father and trait columns.
    data: PathBuf,

    /// TOML file overriding the gene prior, trait and mutation tables.
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Spread the enumeration over all cores.
    #[arg(long)]
    parallel: bool,

    /// Decimal places in the printed probabilities.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let start = Instant::now();

    let tables = match &args.tables {
        Some(path) => {
            info!("Using probability tables from {}", path.display());
            ProbabilityTables::from_path(path)?
        }
        None => ProbabilityTables::default(),
    };

    let mut pedigree = Pedigree::new();
    pedigree.observe(PedigreeCsvBuilder::new().from_path(&args.data)?)?;
    info!(
        "Loaded {} people ({} founders) from {}",
        pedigree.len(),
        pedigree.founders(),
        args.data.display()
    );

    let options = InferenceOptions {
        parallel: args.parallel,
    };
    let summary = pedigree.infer(&tables, &options)?;
    info!(
        "Evaluated {} assignments in {:.2}s",
        summary.stats.assignments,
        start.elapsed().as_secs_f64()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&summary.posterior, &mut out, args.precision)?;
    out.flush()?;
    Ok(())
}
