//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{engine_with, scenario_catalog, StaticRemote};
//!
//! #[tokio::test]
//! async fn test_select() {
//!     let dir = tempfile::TempDir::new().unwrap();
//!     let remote = StaticRemote::new(scenario_catalog());
//!     let engine = engine_with(dir.path(), remote.clone());
//!
//!     let response = engine.select(criteria(&["modern"]), None, None).await.unwrap();
//!     assert!(!response.typography.primary_font.is_empty());
//! }
//! ```

mod fixtures;

// Public API - this is what tests import
pub use fixtures::*;
