pub use api::*;
pub use backend::VarisatSolver;
pub use types::*;

mod api;
mod backend;
pub mod mock;
mod types;
