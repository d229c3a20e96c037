//! watchlist library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod cli;
pub mod config;
pub mod exitcode;
pub mod store;
pub mod watchlist;
