//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod indicator_table;
pub mod signal;
pub mod position;
pub mod strategy;
pub mod analysis;
pub mod config_validation;
pub mod error;
