pub mod case;
pub mod glossary;
pub mod question;
pub mod topic;
