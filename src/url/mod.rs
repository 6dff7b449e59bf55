//! URL handling module for Journal-Harvest
//!
//! Index pages link to archive pages and article pages with relative
//! targets; this module resolves them against the page they appear on.

mod resolve;

pub use resolve::{is_archive_link, resolve_link};
