//! Utility functions

mod columns;
mod sanitize;

pub use columns::format_columns;
pub use sanitize::sanitize_filename;
