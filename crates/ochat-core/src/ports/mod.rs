//! Port definitions implemented by adapter crates.

mod server_probe;

pub use server_probe::{ServerProbe, StaticProbe};
