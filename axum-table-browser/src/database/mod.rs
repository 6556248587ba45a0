//! Database abstraction layer
//!
//! This module provides a store-agnostic interface for table discovery
//! and paged row retrieval.

pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-export the main trait
pub use traits::{DatabaseError, DatabaseProvider};

/// Escape character used in every `LIKE ... ESCAPE` clause
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Build a `%term%` pattern in which `%`, `_` and the escape character
/// in `term` match only themselves
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for character in term.chars() {
        if matches!(character, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(character);
    }
    pattern.push('%');
    pattern
}
