use itertools::Itertools;
use std::collections::BTreeSet;

/// A set of people, by name.
pub type Names<'p> = BTreeSet<&'p str>;

/// Lazily yields every subset of `names`, from the empty set up to `names` itself.
///
/// Nothing is materialized up front; calling this again restarts the sequence.
/// Duplicate names in the input collapse, so no subset is produced twice.
pub fn subsets<'p, I>(names: I) -> impl Iterator<Item = Names<'p>>
where
    I: IntoIterator<Item = &'p str>,
{
    names
        .into_iter()
        .collect::<Names<'p>>()
        .into_iter()
        .powerset()
        .map(|subset| subset.into_iter().collect())
}

/// Every `(one_gene, two_genes)` split of `names` into disjoint sets.
///
/// People in neither set carry zero copies, so this yields `3^n` partitions.
pub fn gene_partitions<'a, 'p>(
    names: &'a Names<'p>,
) -> impl Iterator<Item = (Names<'p>, Names<'p>)> + 'a
where
    'p: 'a,
{
    subsets(names.iter().copied()).flat_map(move |one_gene| {
        let rest: Vec<&'p str> = names.difference(&one_gene).copied().collect();
        subsets(rest).map(move |two_genes| (one_gene.clone(), two_genes))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsets_of_empty_set() {
        let all: Vec<Names> = subsets(Vec::new()).collect();
        assert_eq!(all, vec![Names::new()]);
    }

    #[test]
    fn test_subsets_are_complete_and_unique() {
        let all: Vec<Names> = subsets(vec!["Harry", "James", "Lily"]).collect();
        assert_eq!(all.len(), 8);
        let unique: BTreeSet<&Names> = all.iter().collect();
        assert_eq!(unique.len(), 8);
        assert!(all.contains(&Names::new()));
        assert!(all.contains(&["Harry", "James", "Lily"].iter().copied().collect()));
    }

    #[test]
    fn test_subsets_are_deterministic() {
        let first: Vec<Names> = subsets(vec!["b", "a", "c"]).collect();
        let second: Vec<Names> = subsets(vec!["c", "b", "a"]).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_names_collapse() {
        assert_eq!(subsets(vec!["a", "a"]).count(), 2);
    }

    #[test]
    fn test_gene_partitions_are_disjoint_and_number_three_to_the_n() {
        let names: Names = ["Harry", "James", "Lily", "Petunia"].iter().copied().collect();
        let partitions: Vec<_> = gene_partitions(&names).collect();
        assert_eq!(partitions.len(), 81);
        for (one_gene, two_genes) in partitions.iter() {
            assert!(one_gene.is_disjoint(two_genes));
        }
        let unique: BTreeSet<_> = partitions.iter().collect();
        assert_eq!(unique.len(), 81);
    }
}
