use crate::prelude::*;
use csv;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

/// A pedigree row as it appears in the file, before interpretation.
#[derive(Debug, Deserialize)]
struct Row {
    name: Option<String>,
    mother: Option<String>,
    father: Option<String>,
    #[serde(rename = "trait")]
    observed_trait: Option<String>,
}

impl Row {
    fn into_person(self, row: usize) -> Result<Person> {
        let name = self.name.ok_or(HeredityError::MissingName { row })?;
        let observed_trait = match self.observed_trait.as_deref() {
            None => None,
            Some("1") => Some(true),
            Some("0") => Some(false),
            Some(other) => {
                return Err(HeredityError::InvalidTrait {
                    person: name,
                    value: other.to_string(),
                })
            }
        };
        Ok(Person::new(
            &name,
            self.mother.as_deref(),
            self.father.as_deref(),
            observed_trait,
        ))
    }
}

/// Produces `Person`s from delimited pedigree data
///
/// `PedigreeCsv` implements Iterator so it can be passed
/// directly to `Pedigree::observe()`. Columns are matched by header
/// name (`name`, `mother`, `father`, `trait`); any other column is ignored.
pub struct PedigreeCsv {
    records: std::iter::Enumerate<csv::DeserializeRecordsIntoIter<Box<dyn Read>, Row>>,
}

impl Iterator for PedigreeCsv {
    type Item = Result<Person>;

    fn next(&mut self) -> Option<Result<Person>> {
        let (idx, record) = self.records.next()?;
        Some(
            record
                .map_err(HeredityError::from)
                .and_then(|row| row.into_person(idx + 1)),
        )
    }
}

pub struct PedigreeCsvBuilder {
    delimiter: u8,
}

impl Default for PedigreeCsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PedigreeCsvBuilder {
    /// Construct a new pedigree reader builder
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<PedigreeCsv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?;
        if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
            return Err(HeredityError::MissingColumn(missing.to_string()));
        }

        Ok(PedigreeCsv {
            records: rdr.into_deserialize().enumerate(),
        })
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<PedigreeCsv> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HeredityError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.from_reader(Box::new(file))
    }
}
