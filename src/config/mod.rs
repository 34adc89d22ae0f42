//! Configuration module for Link-Tally
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file that tunes the HTTP client.
//!
//! # Example
//!
//! ```no_run
//! use link_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-tally.toml")).unwrap();
//! println!("Following up to {} redirects", config.http.max_redirects);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
