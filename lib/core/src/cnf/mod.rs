//! Hard/soft clause collections handed to an oracle.

use std::fmt::{Display, Formatter};

use crate::clause::Clause;
use crate::lit::Lit;
use crate::model::Model;
use crate::op::ops::AddClause;

pub use self::dimacs::{Dimacs, Wcnf};

mod dimacs;

/// Weighted partial CNF: clauses in `hard` must hold, each `(weight, clause)`
/// in `soft` costs `weight` when falsified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formula {
    pub num_vars: usize,
    pub hard: Vec<Clause>,
    pub soft: Vec<(u64, Clause)>,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_vars(num_vars: usize) -> Self {
        Self {
            num_vars,
            ..Self::default()
        }
    }

    pub fn add_hard(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        self.num_vars = self.num_vars.max(clause.max_var() as usize);
        self.hard.push(clause);
    }

    /// Zero weight promotes the clause to a hard one.
    pub fn add_soft(&mut self, weight: u64, clause: impl Into<Clause>) {
        if weight == 0 {
            self.add_hard(clause);
            return;
        }
        let clause = clause.into();
        self.num_vars = self.num_vars.max(clause.max_var() as usize);
        self.soft.push((weight, clause));
    }

    pub fn extend_hard<I>(&mut self, clauses: I)
    where
        I: IntoIterator<Item = Clause>,
    {
        for clause in clauses {
            self.add_hard(clause);
        }
    }

    pub fn is_weighted(&self) -> bool {
        !self.soft.is_empty()
    }

    pub fn num_clauses(&self) -> usize {
        self.hard.len() + self.soft.len()
    }

    /// Sum of all soft weights, `None` if it does not fit in a `u64`.
    pub fn checked_soft_weight(&self) -> Option<u64> {
        self.soft.iter().try_fold(0u64, |acc, (w, _)| acc.checked_add(*w))
    }

    /// Sum of all soft weights, saturating at `u64::MAX`.
    pub fn total_soft_weight(&self) -> u64 {
        self.checked_soft_weight().unwrap_or(u64::MAX)
    }

    pub fn max_var(&self) -> u32 {
        self.hard
            .iter()
            .chain(self.soft.iter().map(|(_, c)| c))
            .map(Clause::max_var)
            .max()
            .unwrap_or(0)
    }

    pub fn is_feasible(&self, model: &Model) -> bool {
        self.hard.iter().all(|c| c.is_satisfied(model))
    }

    /// Sum of the weights of soft clauses falsified by `model`.
    pub fn violated_weight(&self, model: &Model) -> u64 {
        self.soft
            .iter()
            .filter(|(_, c)| !c.is_satisfied(model))
            .fold(0u64, |acc, (w, _)| acc.saturating_add(*w))
    }

    pub fn dimacs(&self) -> Dimacs<'_> {
        Dimacs(self)
    }

    pub fn wcnf(&self) -> Wcnf<'_> {
        Wcnf(self)
    }
}

impl AddClause for Formula {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.add_hard(Clause::from(lits));
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Formula(vars = {}, hard = {}, soft = {})",
            self.num_vars,
            self.hard.len(),
            self.soft.len()
        )
    }
}
