pub use crate::distribution::{Distributions, PersonPosterior, Posterior};
pub use crate::error::{HeredityError, Result};
pub use crate::genetics::{GeneCount, ProbabilityTables};
pub use crate::inference::{
    joint_probability, Assignment, Infer, InferenceOptions, InferenceStats, InferenceSummary,
};
pub use crate::observable::{PedigreeCsv, PedigreeCsvBuilder};
pub use crate::report::write_report;
pub use crate::subsets::{subsets, Names};
pub use crate::{Pedigree, Person};
