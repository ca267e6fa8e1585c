use crate::prelude::*;
use crate::subsets::gene_partitions;
use log::{debug, warn};
use rayon::prelude::*;

/// Above this many people exact enumeration starts to take noticeable time.
const LARGE_PEDIGREE: usize = 10;

/// One complete guess at every hidden variable in a pedigree.
///
/// Anyone in neither `one_gene` nor `two_genes` carries zero copies, and
/// anyone outside `have_trait` does not express the trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<'p> {
    one_gene: Names<'p>,
    two_genes: Names<'p>,
    have_trait: Names<'p>,
}

impl<'p> Assignment<'p> {
    pub fn new(one_gene: Names<'p>, two_genes: Names<'p>, have_trait: Names<'p>) -> Self {
        debug_assert!(one_gene.is_disjoint(&two_genes));
        Self {
            one_gene,
            two_genes,
            have_trait,
        }
    }

    pub fn gene_count(&self, name: &str) -> GeneCount {
        if self.one_gene.contains(name) {
            GeneCount::One
        } else if self.two_genes.contains(name) {
            GeneCount::Two
        } else {
            GeneCount::Zero
        }
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.have_trait.contains(name)
    }
}

/// Probability of exactly `assignment` holding across the whole pedigree.
///
/// Founders draw their gene count from the prior; everyone else inherits
/// one copy (or not) from each parent. Each person then contributes the
/// probability of their assigned trait given their assigned gene count.
pub fn joint_probability(
    pedigree: &Pedigree,
    assignment: &Assignment,
    tables: &ProbabilityTables,
) -> f64 {
    pedigree
        .people()
        .map(|person| {
            let genes = assignment.gene_count(person.name());
            let gene_probability = match person.parents() {
                Some((mother, father)) => tables.inheritance(
                    assignment.gene_count(mother),
                    assignment.gene_count(father),
                    genes,
                ),
                None => tables.gene_prior(genes),
            };
            gene_probability * tables.trait_given_gene(genes, assignment.has_trait(person.name()))
        })
        .product()
}

/// Whether `have_trait` agrees with every observed trait in the pedigree.
pub fn consistent_with_evidence(pedigree: &Pedigree, have_trait: &Names) -> bool {
    pedigree.people().all(|person| match person.observed_trait() {
        Some(observed) => observed == have_trait.contains(person.name()),
        None => true,
    })
}

/// Counters describing how much of the assignment space was walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceStats {
    /// Trait subsets produced by the enumerator, consistent or not.
    pub trait_subsets: u64,
    /// Trait subsets dropped because they contradict the evidence.
    pub skipped_trait_subsets: u64,
    /// Full assignments evaluated.
    pub assignments: u64,
    /// Evaluated assignments with positive joint probability.
    pub nonzero_assignments: u64,
}

impl InferenceStats {
    fn merge(self, other: Self) -> Self {
        Self {
            trait_subsets: self.trait_subsets + other.trait_subsets,
            skipped_trait_subsets: self.skipped_trait_subsets + other.skipped_trait_subsets,
            assignments: self.assignments + other.assignments,
            nonzero_assignments: self.nonzero_assignments + other.nonzero_assignments,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Split the trait subsets across the rayon thread pool.
    pub parallel: bool,
}

pub struct InferenceSummary {
    pub posterior: Posterior,
    pub stats: InferenceStats,
}

pub trait Infer {
    fn infer(
        &self,
        tables: &ProbabilityTables,
        options: &InferenceOptions,
    ) -> Result<InferenceSummary>;
}

/// Running totals for some share of the trait subsets.
struct Tally {
    distributions: Distributions,
    stats: InferenceStats,
}

impl Tally {
    fn new(names: &[&str]) -> Self {
        Self {
            distributions: Distributions::zeros(names),
            stats: InferenceStats::default(),
        }
    }

    fn visit<'p>(
        &mut self,
        pedigree: &Pedigree,
        tables: &ProbabilityTables,
        names: &Names<'p>,
        have_trait: Names<'p>,
    ) {
        self.stats.trait_subsets += 1;
        if !consistent_with_evidence(pedigree, &have_trait) {
            debug!("Skipping trait subset {:?}, contradicts evidence", have_trait);
            self.stats.skipped_trait_subsets += 1;
            return;
        }

        for (one_gene, two_genes) in gene_partitions(names) {
            let assignment = Assignment::new(one_gene, two_genes, have_trait.clone());
            let p = joint_probability(pedigree, &assignment, tables);
            self.distributions.update(&assignment, p);
            self.stats.assignments += 1;
            if p > 0.0 {
                self.stats.nonzero_assignments += 1;
            }
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            distributions: self.distributions.merge(other.distributions),
            stats: self.stats.merge(other.stats),
        }
    }
}

impl Infer for Pedigree {
    /// Exact posterior gene and trait distributions for every person.
    ///
    /// Walks every trait subset consistent with the evidence and, for each,
    /// every split of the pedigree into zero-, one- and two-copy carriers.
    fn infer(
        &self,
        tables: &ProbabilityTables,
        options: &InferenceOptions,
    ) -> Result<InferenceSummary> {
        if self.is_empty() {
            return Err(HeredityError::EmptyPedigree);
        }
        if self.len() > LARGE_PEDIGREE {
            warn!(
                "Exact enumeration over {} people visits up to {} assignments",
                self.len(),
                6f64.powi(self.len() as i32)
            );
        }

        let order = self.names();
        let names: Names = order.iter().copied().collect();

        let tally = if options.parallel {
            subsets(order.iter().copied())
                .par_bridge()
                .map(|have_trait| {
                    let mut tally = Tally::new(&order);
                    tally.visit(self, tables, &names, have_trait);
                    tally
                })
                .reduce(|| Tally::new(&order), Tally::merge)
        } else {
            let mut tally = Tally::new(&order);
            for have_trait in subsets(order.iter().copied()) {
                tally.visit(self, tables, &names, have_trait);
            }
            tally
        };

        debug!("{:?}", tally.stats);
        Ok(InferenceSummary {
            posterior: tally.distributions.normalize()?,
            stats: tally.stats,
        })
    }
}
