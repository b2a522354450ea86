//! Hard clauses forbidding resource conflicts.
//!
//! Courses are grouped (by curriculum, by teacher) before they are paired, so
//! two courses that share neither may always run in the same slot.

use itertools::Itertools;
use rayon::prelude::*;

use ctt_sat_core::clause::Clause;
use ctt_sat_core::op::ops::{AddClause, Ops};

use crate::problem::Problem;
use crate::vars::Vars;

fn pair_clashes(pairs: &[(usize, usize)], problem: &Problem, vars: &Vars) -> Vec<Clause> {
    (0..problem.total_slots())
        .into_par_iter()
        .flat_map_iter(|h| {
            let mut clauses = Vec::with_capacity(pairs.len());
            for &(a, b) in pairs {
                clauses.nand(vars.ch[[a, h]], vars.ch[[b, h]]);
            }
            clauses
        })
        .collect()
}

/// Members of a common curriculum never share a slot.
pub fn curriculum_clashes(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let pairs = problem.curriculum_pairs().into_iter().collect_vec();
    pair_clashes(&pairs, problem, vars)
}

/// Courses of one teacher never share a slot.
pub fn teacher_clashes(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let pairs = problem.teacher_pairs().into_iter().collect_vec();
    pair_clashes(&pairs, problem, vars)
}

/// At most one course per room and slot.
pub fn room_clashes(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let courses = problem.num_courses();
    let rooms = problem.num_rooms();
    (0..problem.total_slots())
        .into_par_iter()
        .flat_map_iter(|h| {
            let mut clauses = Vec::new();
            for r in 0..rooms {
                if let Some(chr) = vars.chr.as_ref() {
                    let lits = (0..courses).map(|c| chr[[c, h, r]]).collect_vec();
                    clauses.at_most_one_pairwise(&lits);
                } else {
                    for (a, b) in (0..courses).tuple_combinations() {
                        clauses.add_clause([-vars.ch[[a, h]], -vars.ch[[b, h]], -vars.cr[[a, r]], -vars.cr[[b, r]]]);
                    }
                }
            }
            clauses
        })
        .collect()
}

/// Unit `-CH(c,h)` for every unavailable slot.
pub fn unavailability(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(problem.unavailable.len());
    for &(c, h) in problem.unavailable.iter() {
        clauses.add_unit(-vars.ch[[c, h]]);
    }
    clauses
}

/// All clash clauses, in a fixed order.
pub fn clash_clauses(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let ((mut all, teachers), (rooms, unavailable)) = rayon::join(
        || rayon::join(|| curriculum_clashes(problem, vars), || teacher_clashes(problem, vars)),
        || rayon::join(|| room_clashes(problem, vars), || unavailability(problem, vars)),
    );
    all.extend(teachers);
    all.extend(rooms);
    all.extend(unavailable);
    all
}
