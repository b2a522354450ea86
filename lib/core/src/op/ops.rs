use crate::clause::Clause;
use crate::lit::Lit;

/// Anything clauses can be appended to.
pub trait AddClause {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>;

    fn add_unit(&mut self, lit: Lit) {
        self.add_clause([lit]);
    }
}

impl AddClause for Vec<Clause> {
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.push(Clause::from(lits));
    }
}

impl<T> Ops for T where T: AddClause + ?Sized {}

pub trait Ops: AddClause {
    // ==========
    // basic ops
    // ==========

    /// `lhs => rhs`
    fn imply(&mut self, lhs: Lit, rhs: Lit) {
        self.add_clause([-lhs, rhs]);
    }

    /// `NOT(a AND b)`
    fn nand(&mut self, a: Lit, b: Lit) {
        self.add_clause([-a, -b]);
    }

    // ========
    // imply-*
    // ========

    /// `lhs => OR(rhs)`
    fn imply_or<I>(&mut self, lhs: Lit, rhs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let rhs = rhs.into_iter();
        let mut v = Vec::with_capacity(1 + rhs.size_hint().0);
        v.push(-lhs);
        v.extend(rhs);
        self.add_clause(v);
    }

    // =====
    // misc
    // =====

    /// Pairwise `AtMostOne(xs)`
    fn at_most_one_pairwise(&mut self, xs: &[Lit]) {
        for (i, &a) in xs.iter().enumerate() {
            for &b in &xs[i + 1..] {
                self.nand(a, b);
            }
        }
    }
}
