//! Consolidated test utilities for forecast-navigator
//!
//! Integration tests run the binary offline against a temporary workspace, and
//! drive the resolver directly against an in-memory catalog.

pub mod assertions;
pub mod fixtures;
pub mod mock_catalog;
pub mod workspace;
