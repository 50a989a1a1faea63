//! `dossierdiff-recon` — revision comparison engine for qualification files.
//!
//! Pure engine crate: receives pre-parsed document records, returns an
//! ordered list of classified change rows. No CLI or IO dependencies.

pub mod config;
pub mod describe;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod sections;
pub mod similarity;
pub mod summary;

pub use config::CompareConfig;
pub use engine::{load_document, run};
pub use error::CompareError;
pub use model::{ChangeRecord, CompareResult, DocumentRecord};
