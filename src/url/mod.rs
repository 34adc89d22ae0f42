//! URL handling module for Link-Tally
//!
//! This module provides page-key normalization and host comparison.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, is_same_domain};
pub use normalize::{normalize, normalize_url, NormalizedKey};
