//! Command handlers.
//!
//! Handlers take the composed [`CliContext`](crate::CliContext), call into
//! the client or supervisor, and format output for the terminal. Server
//! startup and teardown happen around them in `main`.

pub mod chat;
pub mod favourites;
mod interrupt;
pub mod models;
pub mod pull;
pub mod serve;

pub(crate) use interrupt::CtrlC;
