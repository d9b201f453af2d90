use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GlossaryTerm {
    pub term: String,
    pub category: String,
    pub definition: String,
}
