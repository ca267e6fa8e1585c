use crate::prelude::*;
use ndarray::{Array2, ArrayView1, Axis};

/// Running, unnormalized gene and trait masses for every person.
///
/// Row `i` of `genes` is indexed by gene count, row `i` of `traits` by
/// `has_trait as usize`. Rows follow the order of `names`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distributions {
    names: Vec<String>,
    genes: Array2<f64>,
    traits: Array2<f64>,
}

impl Distributions {
    /// All-zero distributions for `names`.
    pub fn zeros<S: AsRef<str>>(names: &[S]) -> Self {
        let n = names.len();
        Self {
            names: names.iter().map(|s| s.as_ref().to_string()).collect(),
            genes: Array2::zeros((n, GeneCount::ALL.len())),
            traits: Array2::zeros((n, 2)),
        }
    }

    /// Adds the joint probability `p` of `assignment` to the bucket each
    /// person is assigned to.
    pub fn update(&mut self, assignment: &Assignment, p: f64) {
        for (i, name) in self.names.iter().enumerate() {
            self.genes[[i, assignment.gene_count(name).index()]] += p;
            self.traits[[i, assignment.has_trait(name) as usize]] += p;
        }
    }

    /// Folds another set of running totals over the same people into this one.
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.names, other.names);
        self.genes += &other.genes;
        self.traits += &other.traits;
        self
    }

    /// Rescales every person's gene and trait distributions to sum to one.
    ///
    /// Fails on the first person whose distribution never received mass.
    pub fn normalize(self) -> Result<Posterior> {
        let Self {
            names,
            mut genes,
            mut traits,
        } = self;

        normalize_rows(&mut genes, &names)?;
        normalize_rows(&mut traits, &names)?;

        Ok(Posterior {
            names,
            genes,
            traits,
        })
    }
}

fn normalize_rows(table: &mut Array2<f64>, names: &[String]) -> Result<()> {
    let sums = table.sum_axis(Axis(1));
    for (i, (mut row, &total)) in table.outer_iter_mut().zip(sums.iter()).enumerate() {
        if !(total > 0.0 && total.is_finite()) {
            return Err(HeredityError::UnsatisfiableEvidence {
                person: names[i].clone(),
            });
        }
        row.mapv_inplace(|p| p / total);
    }
    Ok(())
}

/// Normalized gene and trait distributions, read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    names: Vec<String>,
    genes: Array2<f64>,
    traits: Array2<f64>,
}

/// One person's view into a `Posterior`.
#[derive(Debug, Clone, Copy)]
pub struct PersonPosterior<'a> {
    name: &'a str,
    genes: ArrayView1<'a, f64>,
    traits: ArrayView1<'a, f64>,
}

impl<'a> PersonPosterior<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn gene(&self, genes: GeneCount) -> f64 {
        self.genes[genes.index()]
    }

    pub fn has_trait(&self, has_trait: bool) -> f64 {
        self.traits[has_trait as usize]
    }
}

impl Posterior {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn person(&self, name: &str) -> Option<PersonPosterior<'_>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.at(i))
    }

    fn at(&self, i: usize) -> PersonPosterior<'_> {
        PersonPosterior {
            name: &self.names[i],
            genes: self.genes.row(i),
            traits: self.traits.row(i),
        }
    }

    /// People in the order they were enumerated (name order).
    pub fn iter(&self) -> impl Iterator<Item = PersonPosterior<'_>> {
        (0..self.names.len()).map(move |i| self.at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::error::Error;

    fn names(list: &[&'static str]) -> Names<'static> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_update_is_additive() {
        let mut dist = Distributions::zeros(&["a", "b"]);
        let first = Assignment::new(names(&["a"]), names(&["b"]), names(&["a"]));
        let second = Assignment::new(names(&[]), names(&["b"]), names(&[]));
        dist.update(&first, 0.25);
        dist.update(&second, 0.5);

        assert_eq!(dist.genes.row(0).to_vec(), vec![0.5, 0.25, 0.0]);
        assert_eq!(dist.genes.row(1).to_vec(), vec![0.0, 0.0, 0.75]);
        assert_eq!(dist.traits.row(0).to_vec(), vec![0.5, 0.25]);
        assert_eq!(dist.traits.row(1).to_vec(), vec![0.75, 0.0]);
        assert_eq!(dist.genes.row(1).sum(), dist.traits.row(1).sum());
    }

    #[test]
    fn test_normalize_preserves_proportions() -> Result<(), Box<dyn Error>> {
        let mut dist = Distributions::zeros(&["a"]);
        dist.update(&Assignment::new(names(&["a"]), names(&[]), names(&["a"])), 0.3);
        dist.update(&Assignment::new(names(&[]), names(&[]), names(&[])), 0.1);

        let posterior = dist.normalize()?;
        let a = posterior.person("a").ok_or("missing person")?;
        assert_abs_diff_eq!(a.gene(GeneCount::Zero), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(a.gene(GeneCount::One), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(a.gene(GeneCount::Two), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.has_trait(true), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(a.has_trait(false), 0.25, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_normalize_rejects_untouched_person() {
        let dist = Distributions::zeros(&["a", "b"]);
        match dist.normalize() {
            Err(HeredityError::UnsatisfiableEvidence { person }) => assert_eq!(person, "a"),
            other => panic!("expected unsatisfiable evidence, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_matches_sequential_updates() {
        let assignment = Assignment::new(names(&["a"]), names(&[]), names(&[]));
        let mut left = Distributions::zeros(&["a"]);
        let mut right = Distributions::zeros(&["a"]);
        let mut both = Distributions::zeros(&["a"]);
        left.update(&assignment, 0.2);
        right.update(&assignment, 0.3);
        both.update(&assignment, 0.2);
        both.update(&assignment, 0.3);
        assert_eq!(left.merge(right), both);
    }
}
