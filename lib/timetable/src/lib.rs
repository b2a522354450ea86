//! Curriculum-based course timetabling (ITC2007 CTT) encoded as SAT or
//! weighted partial MaxSAT.
//!
//! [`encode`] validates an [`Instance`], allocates the variable families and
//! runs the structural, clash, lecture-count and soft generators for the
//! chosen [`Mode`].

pub use assemble::{encode, encode_with, EncodeConfig, Encoded};
pub use error::EncodeError;
pub use instance::{Course, Curriculum, Instance, Room, Unavailability};
pub use mode::{Mode, ParseModeError, Policies, Policy, Weights};
pub use parsing::ParseError;
pub use vars::{VarKey, VarPool, Vars};

pub mod assemble;
pub mod clash;
pub mod emit;
pub mod error;
pub mod instance;
pub mod lectures;
pub mod mode;
pub mod parsing;
pub mod problem;
pub mod soft;
pub mod structural;
pub mod vars;
