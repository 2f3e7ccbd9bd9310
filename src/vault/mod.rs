//! Bundled corpus and backend implementations
//!
//! - [`VaultIndex`]: link-resolved metadata index that evaluates compiled
//!   queries in-process
//! - [`MemoryVault`]: documents held in memory
//! - [`FsVault`]: a directory of markdown files
//! - [`SystemOpener`]: navigation sink that opens files with the OS
//!
//! Any of these can be swapped for an external implementation of the
//! [`crate::corpus`] traits.

pub mod document;
pub mod fs;
pub mod index;
pub mod markdown;
pub mod memory;

pub use document::Document;
pub use fs::{FsVault, SystemOpener};
pub use index::{ResolvedLink, VaultIndex};
pub use markdown::RawLink;
pub use memory::MemoryVault;
