use ctt_sat_core::clause::Clause;
use ctt_sat_core::cnf::Formula;
use ctt_sat_core::encoder::Encoder;
use ctt_sat_core::lit::Lit;
use ctt_sat_core::op::ops::AddClause;

use crate::mode::Policy;
use crate::vars::VarPool;

/// Sequential clause sink for generators that need auxiliary variables.
///
/// Plain `add_clause` goes to the hard part; [`Emitter::emit`] routes by policy.
#[derive(Debug)]
pub struct Emitter {
    pub pool: VarPool,
    pub formula: Formula,
}

impl Emitter {
    pub fn new(pool: VarPool) -> Self {
        let formula = Formula::with_num_vars(pool.num_vars());
        Self { pool, formula }
    }

    pub fn emit(&mut self, policy: Policy, clause: impl Into<Clause>) {
        match policy {
            Policy::Hard => self.formula.add_hard(clause),
            Policy::Soft(weight) => self.formula.add_soft(weight, clause),
        }
    }

    pub fn extend_hard(&mut self, clauses: Vec<Clause>) {
        self.formula.extend_hard(clauses);
    }

    /// Closes the formula: `num_vars` becomes the allocator's high-water mark.
    pub fn finish(mut self) -> (VarPool, Formula) {
        self.formula.num_vars = self.pool.num_vars();
        (self.pool, self.formula)
    }
}

impl AddClause for Emitter {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.formula.add_hard(Clause::from(lits));
    }
}

impl Encoder for Emitter {
    fn new_var(&mut self) -> Lit {
        self.pool.new_aux()
    }

    fn num_vars(&self) -> usize {
        self.pool.num_vars()
    }
}
