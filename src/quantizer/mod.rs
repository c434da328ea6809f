//! Quantizer facade
//!
//! Combines range tracking, parameter derivation and fixed-point encoding
//! behind one store keyed by tensor output.

mod store;
mod table;


pub use store::Quantizer;
pub use table::{CalibrationTable, TableEntry};
