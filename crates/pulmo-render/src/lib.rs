//! pulmo-render
//!
//! Plain-text rendering of calculator results and reference content from
//! Tera templates.

pub mod error;
pub mod render;
pub mod templates;
