//! Terminal output helpers.

mod errors;
mod progress;
mod tables;

pub use errors::hint_for;
pub use progress::PullProgress;
pub use tables::{format_modified, format_size, print_separator, truncate_string};
