//! Terminal shell for the local inference server.
//!
//! The `ochat` binary composes the supervisor, the HTTP client and the
//! favourites store in [`bootstrap`] and dispatches to [`handlers`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, FavouritesCommand, ModelsCommand};
pub use parser::Cli;
