//! Filter model
//!
//! Five filter kinds (tag, folder, link, backlink, text) share one value
//! type, [`Filter`], with a negation flag. Filters are plain values: they are
//! cloned into session state, compiled into backend queries and compared
//! structurally.
//!
//! # Examples
//!
//! ```
//! use desk::filter::Filter;
//!
//! let project = Filter::tag("#project");
//! let not_archived = Filter::folder("archive").negated();
//!
//! assert_eq!(project.key().as_str(), "tag:#project");
//! assert_eq!(not_archived.describe(), "Is not inside folder archive");
//! ```

pub mod error;
pub mod types;

pub use error::FilterError;
pub use types::{Filter, FilterKey, FilterKind, FilterType};
