//! Sheet Processing Module
//!
//! Turns loosely structured packing and purchase exports into flat records:
//! decode the first sheet into a cell grid, locate the header row, bind column
//! roles, then fold parent/continuation rows into groups.

pub mod coerce;
pub mod flatten;
pub mod header;
pub mod reader;
pub mod vocabulary;

pub use coerce::{coerce_number, parse_number};
pub use flatten::{flatten_with, group_rows, RowFields, SheetFlattener};
pub use header::{HeaderResolution, HeaderResolver};
pub use reader::{SheetFormat, SheetReader};
pub use vocabulary::HeaderVocabulary;
