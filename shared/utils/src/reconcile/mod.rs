//! Leftover Reconciliation Module
//!
//! Sums quantities per (variety, packing size) key in a purchase dataset and a
//! usage dataset, then reports purchased, used and leftover per key.

pub mod aggregate;
pub mod engine;

pub use aggregate::{aggregate_quantities, KeyTotal, KeyedTotals};
pub use engine::{reconcile, LeftoverCalculator, LeftoverReport, LeftoverSummary};
