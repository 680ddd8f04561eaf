//! # Packtally Core Domain Models
//!
//! Data types shared by the sheet flattener, the leftover reconciliation
//! engine and the HTTP service.
//!
//! ## Key Models
//!
//! - **CellGrid**: raw, possibly ragged rows of cells from the first sheet of a workbook
//! - **FieldRole / FieldRoleMap**: what each column means, resolved once per sheet
//! - **Group / Item / FlatRecord**: grouped purchase lines and their denormalized form
//! - **ReconciliationKey / ReconciliationRow**: purchased vs. used totals per variety and packing size
//!
//! Quantities stay `Option<f64>` all the way through flattening, so a blank
//! cell is never confused with a literal zero.

pub mod grid;
pub mod reconciliation;
pub mod record;
pub mod role;
pub mod text;

#[cfg(test)]
pub mod property_tests;

pub use grid::*;
pub use reconciliation::*;
pub use record::*;
pub use role::*;
pub use text::normalize_text;
