use crate::prelude::*;
use std::io::{self, Write};

pub const DEFAULT_PRECISION: usize = 4;

/// Writes every person's gene and trait distributions as an indented listing.
///
/// Gene counts are listed from two copies down to zero, trait values
/// `True` before `False`.
pub fn write_report<W: Write>(
    posterior: &Posterior,
    out: &mut W,
    precision: usize,
) -> io::Result<()> {
    for person in posterior.iter() {
        writeln!(out, "{}:", person.name())?;
        writeln!(out, "  Gene:")?;
        for &genes in GeneCount::ALL.iter().rev() {
            writeln!(out, "    {}: {:.*}", genes, precision, person.gene(genes))?;
        }
        writeln!(out, "  Trait:")?;
        for &has_trait in [true, false].iter() {
            let label = if has_trait { "True" } else { "False" };
            writeln!(out, "    {}: {:.*}", label, precision, person.has_trait(has_trait))?;
        }
    }
    Ok(())
}
