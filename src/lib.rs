#![crate_name = "heredity"]
use std::collections::BTreeMap;

pub mod prelude;

pub mod distribution;
pub mod error;
pub mod genetics;
pub mod inference;
pub mod observable;
pub mod report;
pub mod subsets;

use error::{HeredityError, Result};

pub type People = BTreeMap<String, Person>;

/// One member of a pedigree as read from the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    observed_trait: Option<bool>,
}

impl Person {
    pub fn new(
        name: &str,
        mother: Option<&str>,
        father: Option<&str>,
        observed_trait: Option<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            mother: mother.map(Into::into),
            father: father.map(Into::into),
            observed_trait,
        }
    }

    /// A person with no recorded parents.
    pub fn founder(name: &str) -> Self {
        Self::new(name, None, None, None)
    }

    pub fn child(name: &str, mother: &str, father: &str) -> Self {
        Self::new(name, Some(mother), Some(father), None)
    }

    pub fn with_trait(mut self, observed_trait: bool) -> Self {
        self.observed_trait = Some(observed_trait);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mother and father, when both are recorded.
    pub fn parents(&self) -> Option<(&str, &str)> {
        match (&self.mother, &self.father) {
            (Some(mother), Some(father)) => Some((mother, father)),
            _ => None,
        }
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    pub fn observed_trait(&self) -> Option<bool> {
        self.observed_trait
    }
}

/// A family of people linked by mother/father references.
///
/// People are kept ordered by name, so every walk over a `Pedigree`
/// (enumeration, evaluation, reporting) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    people: People,
}

impl Pedigree {
    /// Constructs a new empty `Pedigree`
    ///
    /// The `Pedigree` can be filled by calling `observe()`.
    pub fn new() -> Self {
        Self {
            people: People::new(),
        }
    }

    /// Builds and validates a `Pedigree` from people already in memory.
    pub fn from_people<I>(people: I) -> Result<Self>
    where
        I: IntoIterator<Item = Person>,
    {
        let mut pedigree = Self::new();
        pedigree.observe(people.into_iter().map(Ok))?;
        Ok(pedigree)
    }

    fn _observe(&mut self, person: Person) -> Result<()> {
        if self.people.contains_key(&person.name) {
            return Err(HeredityError::DuplicatePerson(person.name));
        }
        self.people.insert(person.name.clone(), person);
        Ok(())
    }

    /// Observe all the people in the argument, then check that every
    /// parent reference resolves.
    ///
    /// Parents may be observed after their children.
    pub fn observe<I>(&mut self, observable: I) -> Result<()>
    where
        I: Iterator<Item = Result<Person>>,
    {
        for person in observable {
            self._observe(person?)?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        for person in self.people.values() {
            if person.is_founder() {
                continue;
            }
            let (mother, father) = person.parents().ok_or_else(|| {
                HeredityError::IncompleteParents {
                    person: person.name.clone(),
                }
            })?;
            for parent in [mother, father].iter() {
                if !self.people.contains_key(*parent) {
                    return Err(HeredityError::UnknownParent {
                        person: person.name.clone(),
                        parent: parent.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    /// People in name order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// A list of the names of all people in the pedigree, in name order.
    pub fn names(&self) -> Vec<&str> {
        self.people.keys().map(String::as_str).collect()
    }

    pub fn founders(&self) -> usize {
        self.people.values().filter(|p| p.is_founder()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pedigree_accepts_parents_listed_after_children() -> Result<(), Box<dyn Error>> {
        let pedigree = Pedigree::from_people(vec![
            Person::child("Harry", "Lily", "James"),
            Person::founder("James").with_trait(true),
            Person::founder("Lily").with_trait(false),
        ])?;
        assert_eq!(pedigree.names(), vec!["Harry", "James", "Lily"]);
        assert_eq!(pedigree.founders(), 2);
        assert_eq!(pedigree.get("Harry").and_then(Person::parents), Some(("Lily", "James")));
        Ok(())
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let result = Pedigree::from_people(vec![
            Person::founder("James"),
            Person::child("Harry", "Lily", "James"),
        ]);
        match result {
            Err(HeredityError::UnknownParent { person, parent }) => {
                assert_eq!(person, "Harry");
                assert_eq!(parent, "Lily");
            }
            other => panic!("expected unknown parent error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_parent_is_rejected() {
        let result = Pedigree::from_people(vec![
            Person::founder("Lily"),
            Person::new("Harry", Some("Lily"), None, None),
        ]);
        assert!(matches!(
            result,
            Err(HeredityError::IncompleteParents { .. })
        ));
    }

    #[test]
    fn test_duplicate_person_is_rejected() {
        let result = Pedigree::from_people(vec![Person::founder("Lily"), Person::founder("Lily")]);
        assert!(matches!(result, Err(HeredityError::DuplicatePerson(name)) if name == "Lily"));
    }
}
