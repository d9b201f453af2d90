//! pulmo-cli
//!
//! Command surface for the `pulmo` binary: argument parsing, config loading
//! and the commands that print calculators and reference content.

pub mod cli;
pub mod commands;
pub mod config;
