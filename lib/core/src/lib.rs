//! SAT plumbing shared by the timetabling encoder: literals and clauses,
//! hard/weighted formulas with DIMACS/WCNF output, the totalizer-based
//! cardinality compiler and the oracle layer.

pub mod card;
pub mod clause;
pub mod cnf;
pub mod encoder;
pub mod lit;
pub mod model;
pub mod op;
pub mod oracle;
pub mod solver;
pub mod utils;
