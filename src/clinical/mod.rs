pub mod builtin;
pub mod completeness;
pub mod detection;
pub mod engine;
pub mod helpers;
pub mod history;
pub mod messages;
pub mod priority;
pub mod questions;
pub mod red_flags;
pub mod report;
pub mod suggestions;
pub mod taxonomy;
pub mod types;

pub use engine::DefaultClinicalInfoEngine;
pub use report::{ClinicalInfoReport, ReportParts};
pub use taxonomy::{Taxonomy, TaxonomyDocument, TaxonomyError};
pub use types::*;
