//! pulmo-reference
//!
//! Static teaching content: topic pages, the glossary, the self-assessment
//! question bank and the guided case scenarios, plus the in-memory sessions
//! that walk a learner through questions and cases.

pub mod cases;
pub mod error;
pub mod glossary;
pub mod quiz;
pub mod topics;
