//! `dossierdiff-io` — file I/O for dossierdiff.
//!
//! Document record loading and report export (CSV, Excel). The engine crate
//! stays free of file concerns.

pub mod csv;
pub mod document;
pub mod xlsx;
