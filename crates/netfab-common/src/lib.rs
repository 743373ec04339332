//! # netfab-common
//!
//! Shared types, error definitions, and the plugin configuration model
//! used across the Netfab workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the foundational primitives that the driver
//! orchestration layer builds upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod types;
