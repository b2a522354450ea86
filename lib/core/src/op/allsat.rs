use itertools::Itertools;

use crate::lit::Lit;
use crate::solver::{LitValue, SolveResponse, Solver};

impl<S> AllSat for S where S: Solver {}

/// Model enumeration by blocking clauses.
pub trait AllSat: Solver {
    fn all_sat<T, F>(&mut self, f: F) -> AllSolutionsIter<Self, F>
    where
        F: FnMut(&mut Self) -> T,
    {
        // If no essential vars were passed, then *all* variables are essential!
        let essential = (1..=self.num_vars()).map(Lit::from_var).collect_vec();
        self.all_sat_essential(essential, f)
    }

    /// Enumerates the distinct assignments of `essential`; solutions that differ
    /// only outside of it are reported once.
    fn all_sat_essential<I, T, F>(&mut self, essential: I, f: F) -> AllSolutionsIter<Self, F>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
        F: FnMut(&mut Self) -> T,
    {
        AllSolutionsIter::new(self, f, essential)
    }

    fn build_refutation(&self, essential: &[Lit]) -> Vec<Lit> {
        essential
            .iter()
            .map(|&x| if matches!(self.value(x), LitValue::True) { -x } else { x })
            .collect_vec()
    }
}

pub struct AllSolutionsIter<'s, S, F>
where
    S: Solver,
{
    solver: &'s mut S,
    callback: F,
    essential: Vec<Lit>,
    refutation: Option<Vec<Lit>>,
    exhausted: bool,
}

impl<'s, S, F> AllSolutionsIter<'s, S, F>
where
    S: Solver,
{
    fn new<I>(solver: &'s mut S, callback: F, essential: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let essential = essential.into_iter().map_into::<Lit>().collect_vec();
        Self {
            solver,
            callback,
            essential,
            refutation: None,
            exhausted: false,
        }
    }
}

impl<'s, T, S, F> Iterator for AllSolutionsIter<'s, S, F>
where
    S: Solver,
    F: FnMut(&mut S) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if let Some(refutation) = self.refutation.take() {
            // An empty projection has exactly one assignment.
            if refutation.is_empty() {
                self.exhausted = true;
                return None;
            }
            // Ban the solution
            self.solver.add_clause(refutation);
        }

        if matches!(self.solver.solve(), SolveResponse::Sat) {
            self.refutation = Some(self.solver.build_refutation(&self.essential));
            // Call the callback in the SAT state
            Some((self.callback)(self.solver))
        } else {
            self.exhausted = true;
            None
        }
    }
}
