//! Backend query compilation
//!
//! Turns an ordered filter list into the single query string understood by
//! the page-query backend, and parses that string back into terms for
//! in-process backends.

pub mod compile;
pub mod error;
pub mod parse;

pub use compile::{compile, compile_term};
pub use error::QueryError;
pub use parse::{Term, TermKind, parse};
