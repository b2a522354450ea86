use std::borrow::Cow;

use crate::lit::Lit;
use crate::op::ops::AddClause;

use super::types::*;

// Note: `Solver` trait is NOT object-safe.

/// Incremental SAT oracle. Clauses go in through [`AddClause`].
pub trait Solver: AddClause + Sized {
    /// Return the signature of the solver as a `Cow<str>`.
    fn signature(&self) -> Cow<'_, str>;

    /// Return the number of variables in the solver.
    fn num_vars(&self) -> usize;

    /// Return the number of clauses in the solver.
    fn num_clauses(&self) -> usize;

    /// Create a new variable in the solver and return its literal representation.
    fn new_var(&mut self) -> Lit;

    /// Make sure variables `1..=num_vars` exist.
    fn reserve_vars(&mut self, num_vars: usize) {
        while self.num_vars() < num_vars {
            self.new_var();
        }
    }

    /// Solve the problem given to the solver and return the result as a [SolveResponse].
    fn solve(&mut self) -> SolveResponse;

    /// Return the value of the given literal in the solver.
    /// Only meaningful right after [`Solver::solve`] returned [`SolveResponse::Sat`].
    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>;
}
