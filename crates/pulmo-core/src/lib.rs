//! pulmo-core
//!
//! Pure domain types shared by the calculators, the reference tables and the
//! front ends. No I/O here; this is the shared vocabulary of Pulmo.

pub mod error;
pub mod models;
