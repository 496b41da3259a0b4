//! Command-line driver for `graphlab-core`
//!
//! Reads a JSON graph snapshot, runs one analytics query and renders the
//! result as a table or as JSON.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
