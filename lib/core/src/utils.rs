use log::debug;

use crate::cnf::Formula;
use crate::solver::Solver;

/// Feeds the hard part of `formula` into `solver`.
pub fn load_hard(solver: &mut impl Solver, formula: &Formula) {
    if formula.num_vars > solver.num_vars() {
        debug!("Adding {} variables...", formula.num_vars - solver.num_vars());
        solver.reserve_vars(formula.num_vars);
    }

    debug!("Adding {} clauses...", formula.hard.len());
    for clause in formula.hard.iter() {
        solver.add_clause(&clause.lits);
    }
}

pub fn type_name_of<T: ?Sized>(_val: &T) -> String {
    tynm::type_name::<T>()
}
