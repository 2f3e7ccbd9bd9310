//! Session state and the driver that keeps results current
//!
//! - [`SessionState`]: filters, sort and suggestions with pure transitions
//! - [`Pager`]: incremental reveal of the result list
//! - [`Desk`]: owns both, coalesces changes and runs the pipeline on tick

pub mod desk;
pub mod error;
pub mod pager;
pub mod state;

pub use desk::{Desk, DeskHandle, TickOutcome};
pub use error::{Result, SessionError};
pub use pager::{BATCH_SIZE, Pager};
pub use state::SessionState;
