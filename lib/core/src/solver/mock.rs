use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::clause::Clause;
use crate::lit::Lit;
use crate::op::ops::AddClause;

use super::types::*;
use super::Solver;

/// Records every clause and replays scripted answers.
///
/// Once the script is exhausted, `solve` answers [`SolveResponse::Unknown`].
/// `value` reads from the assignment set with [`MockSolver::set_model`];
/// unset variables are [`LitValue::DontCare`].
#[derive(Debug, Default)]
pub struct MockSolver {
    nvars: usize,
    pub clauses: Vec<Clause>,
    responses: VecDeque<SolveResponse>,
    model: Vec<bool>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = SolveResponse>,
    {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    /// `model[i]` is the value of variable `i + 1`.
    pub fn set_model(&mut self, model: Vec<bool>) {
        self.model = model;
    }
}

impl Display for MockSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl AddClause for MockSolver {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().collect_vec();
        if let Some(max) = lits.iter().map(|lit| lit.var() as usize).max() {
            self.nvars = self.nvars.max(max);
        }
        self.clauses.push(Clause::new(lits));
    }
}

impl Solver for MockSolver {
    fn signature(&self) -> Cow<'_, str> {
        "mock".into()
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        Lit::from_var(self.nvars)
    }

    fn solve(&mut self) -> SolveResponse {
        self.responses.pop_front().unwrap_or(SolveResponse::Unknown)
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        match self.model.get(lit.var() as usize - 1) {
            Some(&value) => LitValue::from(value == lit.is_positive()),
            None => LitValue::DontCare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_solver() -> color_eyre::Result<()> {
        let mut solver = MockSolver::with_responses([SolveResponse::Sat, SolveResponse::Unsat]);
        assert_eq!(solver.signature(), "mock");

        let a = solver.new_var();
        let b = solver.new_var();
        let c = solver.new_var();
        let d = solver.new_var();
        assert_eq!(solver.num_vars(), 4);

        solver.add_clause([a, b]);
        solver.add_clause(&[c, d]);
        solver.add_clause(vec![-a, -b]);
        solver.add_clause(&vec![-c, -d]);
        solver.add_unit(a);
        solver.add_unit(-c);
        assert_eq!(solver.num_clauses(), 6);
        assert_eq!(solver.clauses[4], Clause::from([a]));

        solver.set_model(vec![true, false]);
        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.value(a), LitValue::True);
        assert_eq!(solver.value(-b), LitValue::True);
        assert_eq!(solver.value(c), LitValue::DontCare);
        assert_eq!(solver.solve(), SolveResponse::Unsat);
        assert_eq!(solver.solve(), SolveResponse::Unknown);

        Ok(())
    }
}
