//! ITC2007 curriculum-based course timetabling as SAT and weighted partial MaxSAT.
//!
//! [`core`] holds the solver-independent CNF machinery (literals, formulas,
//! cardinality encodings, the solver interface and the optimisation oracle),
//! [`timetable`] builds the encoding itself.

pub use ctt_sat_core as core;
pub use ctt_timetable as timetable;
