//! Rebuilds a git repository's history as a stream of line edits that can be
//! replayed to show its files being typed out, commit by commit.
//!
//! [`timeline::build`] walks the history into a [`model::Timeline`];
//! [`replay::ReplaySession`] turns each entry into [`model::EditOperation`]s.

pub mod blob;
pub mod diff;
pub mod error;
pub mod filter;
pub mod hunk;
pub mod line_diff;
pub mod model;
pub mod replay;
pub mod timeline;

pub use error::{ReplayError, Result};
