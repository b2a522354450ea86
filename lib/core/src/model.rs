use crate::lit::Lit;
use crate::solver::{LitValue, Solver};

/// Total assignment of the variables `1..=num_vars` returned by an oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    data: Vec<bool>,
}

impl Model {
    /// `data[i]` is the value of variable `i + 1`.
    pub fn new(data: Vec<bool>) -> Self {
        Self { data }
    }

    /// Reads the first `num_vars` variables back from a solver in the SAT state.
    /// Unassigned variables are taken as false.
    pub fn from_solver<S>(solver: &S, num_vars: usize) -> Self
    where
        S: Solver,
    {
        let data = (1..=num_vars)
            .map(|v| matches!(solver.value(Lit::from_var(v)), LitValue::True))
            .collect();
        Self { data }
    }

    pub fn num_vars(&self) -> usize {
        self.data.len()
    }

    pub fn value(&self, lit: Lit) -> bool {
        let value = self.data[lit.var() as usize - 1];
        value == lit.is_positive()
    }

    pub fn true_vars(&self) -> impl Iterator<Item = Lit> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(|(i, _)| Lit::from_var(i + 1))
    }
}
