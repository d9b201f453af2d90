pub mod ahi;
pub mod ards;
pub mod asthma;
pub mod copd;
pub mod curb65;
pub mod gold;
pub mod pe_risk;
pub mod peak_flow;
pub mod perc;
pub mod pneumonia;
pub mod stop_bang;
pub mod tuberculosis;
pub mod wells;
