use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use log::error;
use varisat::ExtendFormula;

use crate::lit::Lit;
use crate::op::ops::AddClause;

use super::types::*;
use super::Solver;

/// [`Solver`] over the pure-Rust `varisat` CDCL solver.
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    nvars: usize,
    nclauses: usize,
    // Indexed by 0-based variable index, filled after a SAT answer.
    model: Vec<LitValue>,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            nvars: 0,
            nclauses: 0,
            model: Vec::new(),
        }
    }

    fn to_varisat(lit: Lit) -> varisat::Lit {
        varisat::Lit::from_dimacs(lit.get() as isize)
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        VarisatSolver::new()
    }
}

impl Display for VarisatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl AddClause for VarisatSolver {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits: Vec<varisat::Lit> = lits
            .into_iter()
            .map(|lit| {
                let lit = lit.into();
                self.nvars = self.nvars.max(lit.var() as usize);
                Self::to_varisat(lit)
            })
            .collect();
        self.nclauses += 1;
        self.inner.add_clause(&lits);
    }
}

impl Solver for VarisatSolver {
    fn signature(&self) -> Cow<'_, str> {
        "varisat-0.2".into()
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.nclauses
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        Lit::from_var(self.nvars)
    }

    fn solve(&mut self) -> SolveResponse {
        self.model.clear();
        match self.inner.solve() {
            Ok(true) => {
                self.model = vec![LitValue::DontCare; self.nvars];
                for lit in self.inner.model().unwrap_or_default() {
                    let index = lit.var().index();
                    if index < self.model.len() {
                        self.model[index] = LitValue::from(lit.is_positive());
                    }
                }
                SolveResponse::Sat
            }
            Ok(false) => SolveResponse::Unsat,
            Err(e) => {
                error!("varisat failed: {}", e);
                SolveResponse::Unknown
            }
        }
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        match self.model.get(lit.var() as usize - 1) {
            Some(LitValue::True) if lit.is_positive() => LitValue::True,
            Some(LitValue::True) => LitValue::False,
            Some(LitValue::False) if lit.is_positive() => LitValue::False,
            Some(LitValue::False) => LitValue::True,
            _ => LitValue::DontCare,
        }
    }
}
