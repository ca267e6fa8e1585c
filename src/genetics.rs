use crate::error::{HeredityError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

const TOLERANCE: f64 = 1e-9;

/// Number of copies of the trait-linked gene a person carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Position of this count in a `[_; 3]` table, which is also the number of copies.
    pub fn index(self) -> usize {
        match self {
            GeneCount::Zero => 0,
            GeneCount::One => 1,
            GeneCount::Two => 2,
        }
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Fixed parameters of the inheritance model.
///
/// Built once, validated, and then shared by reference for the whole run.
/// `trait_given_gene[g]` holds `[P(no trait | g), P(trait | g)]`, so a trait
/// value indexes its row with `present as usize`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbabilityTables {
    gene_prior: [f64; 3],
    trait_given_gene: [[f64; 2]; 3],
    mutation_rate: f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_gene: [[0.99, 0.01], [0.44, 0.56], [0.35, 0.65]],
            mutation_rate: 0.01,
        }
    }
}

impl ProbabilityTables {
    pub fn new(
        gene_prior: [f64; 3],
        trait_given_gene: [[f64; 2]; 3],
        mutation_rate: f64,
    ) -> Result<Self> {
        let tables = Self {
            gene_prior,
            trait_given_gene,
            mutation_rate,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Reads tables from a TOML file with `gene_prior`, `trait_given_gene`
    /// and `mutation_rate` keys.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| HeredityError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let tables: Self = toml::from_str(content)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<()> {
        let values = self
            .gene_prior
            .iter()
            .chain(self.trait_given_gene.iter().flatten())
            .chain(std::iter::once(&self.mutation_rate));
        for &p in values {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(HeredityError::invalid_tables(format!(
                    "{} is not a probability",
                    p
                )));
            }
        }

        let prior_sum: f64 = self.gene_prior.iter().sum();
        if (prior_sum - 1.0).abs() > TOLERANCE {
            return Err(HeredityError::invalid_tables(format!(
                "gene prior sums to {}, not 1",
                prior_sum
            )));
        }

        for (g, row) in self.trait_given_gene.iter().enumerate() {
            let row_sum = row[0] + row[1];
            if (row_sum - 1.0).abs() > TOLERANCE {
                return Err(HeredityError::invalid_tables(format!(
                    "trait probabilities for {} gene(s) sum to {}, not 1",
                    g, row_sum
                )));
            }
        }

        // A one-gene parent passes with 0.5 + m.
        if self.mutation_rate > 0.5 {
            return Err(HeredityError::invalid_tables(format!(
                "mutation rate {} exceeds 0.5",
                self.mutation_rate
            )));
        }
        Ok(())
    }

    pub fn gene_prior(&self, genes: GeneCount) -> f64 {
        self.gene_prior[genes.index()]
    }

    pub fn trait_given_gene(&self, genes: GeneCount, has_trait: bool) -> f64 {
        self.trait_given_gene[genes.index()][has_trait as usize]
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Probability that a parent with `genes` copies hands a copy to a child,
    /// paired with the probability that it does not.
    ///
    /// Mutation is applied additively to the 0.5 base of a one-gene parent:
    /// `(0.5 + m, 0.5 - m)`. This is not the multiplicative textbook model
    /// and must stay this way for the computed posteriors to match.
    pub fn transmission(&self, genes: GeneCount) -> (f64, f64) {
        let m = self.mutation_rate;
        match genes {
            GeneCount::Zero => (m, 1.0 - m),
            GeneCount::One => (0.5 + m, 0.5 - m),
            GeneCount::Two => (1.0 - m, m),
        }
    }

    /// Probability that a child of parents carrying `mother` and `father`
    /// copies ends up carrying `child` copies.
    pub fn inheritance(&self, mother: GeneCount, father: GeneCount, child: GeneCount) -> f64 {
        let (mother_pass, mother_keep) = self.transmission(mother);
        let (father_pass, father_keep) = self.transmission(father);
        match child {
            GeneCount::Zero => mother_keep * father_keep,
            GeneCount::One => mother_pass * father_keep + mother_keep * father_pass,
            GeneCount::Two => mother_pass * father_pass,
        }
    }
}
