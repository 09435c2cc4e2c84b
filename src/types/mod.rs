//! Data types for the grid: cells, rows, columns, selection and configuration.

mod cell;
mod config;
mod selection;
mod sheet;

pub use cell::*;
pub use config::*;
pub use selection::*;
pub use sheet::*;
