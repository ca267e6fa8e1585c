use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between reading a pedigree and reporting its posterior.
#[derive(Error, Debug)]
pub enum HeredityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed rows, such as a row with too few fields.
    #[error("Malformed pedigree data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pedigree file has no {0:?} column")]
    MissingColumn(String),

    #[error("Row {row} has no name")]
    MissingName { row: usize },

    #[error("Person {0} appears more than once")]
    DuplicatePerson(String),

    #[error("Person {person} names parent {parent}, who is not in the pedigree")]
    UnknownParent { person: String, parent: String },

    #[error("Person {person} must have both a mother and a father recorded, or neither")]
    IncompleteParents { person: String },

    #[error("Person {person} has trait value {value:?}, expected \"1\", \"0\" or empty")]
    InvalidTrait { person: String, value: String },

    #[error("Invalid probability tables: {0}")]
    InvalidTables(String),

    #[error("Could not parse probability tables: {0}")]
    TablesFormat(#[from] toml::de::Error),

    #[error("The pedigree contains no people")]
    EmptyPedigree,

    /// Every assignment consistent with the evidence had zero probability.
    #[error(
        "Evidence is unsatisfiable: the distributions of {person} received no probability mass"
    )]
    UnsatisfiableEvidence { person: String },
}

pub type Result<T, E = HeredityError> = std::result::Result<T, E>;

impl HeredityError {
    pub fn invalid_tables(message: impl Into<String>) -> Self {
        Self::InvalidTables(message.into())
    }
}
