use crate::clause::Clause;
use crate::cnf::Formula;
use crate::lit::Lit;
use crate::op::ops::AddClause;

/// Clause sink that can also hand out fresh variables.
pub trait Encoder: AddClause {
    fn new_var(&mut self) -> Lit;

    /// Highest variable handed out so far.
    fn num_vars(&self) -> usize;

    fn new_var_vec(&mut self, len: usize) -> Vec<Lit> {
        (0..len).map(|_| self.new_var()).collect()
    }
}

/// Plain in-memory encoder: a variable counter plus a list of hard clauses.
#[derive(Debug, Default)]
pub struct CnfEncoder {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

impl CnfEncoder {
    /// Fresh variables start right after `num_vars`.
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn into_formula(self) -> Formula {
        let mut formula = Formula::with_num_vars(self.num_vars);
        formula.extend_hard(self.clauses);
        formula
    }
}

impl AddClause for CnfEncoder {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let clause = Clause::from(lits);
        assert!(!clause.is_empty(), "clause must not be empty");
        self.clauses.push(clause);
    }
}

impl Encoder for CnfEncoder {
    fn new_var(&mut self) -> Lit {
        self.num_vars += 1;
        Lit::from_var(self.num_vars)
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }
}
