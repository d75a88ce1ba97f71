//! Common test utilities for printstack integration tests.
//!
//! This module provides:
//! - Fixtures: a seeded registry with single- and dual-extruder machine definitions
//! - `catalogs()`: in-memory catalogs that satisfy those definitions

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
