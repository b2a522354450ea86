//! Hard clauses tying the variable families together.

use rayon::prelude::*;

use ctt_sat_core::clause::Clause;
use ctt_sat_core::op::ops::Ops;

use crate::problem::Problem;
use crate::vars::Vars;

/// `CH(c,h) -> CD(c,day(h))` and `CD(c,d) -> OR_{h in d} CH(c,h)`.
pub fn day_links(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let instance = problem.instance;
    (0..problem.num_courses())
        .into_par_iter()
        .flat_map_iter(|c| {
            let mut clauses = Vec::new();
            for h in 0..problem.total_slots() {
                clauses.imply(vars.ch[[c, h]], vars.cd[[c, instance.day_of(h)]]);
            }
            for d in 0..problem.num_days() {
                clauses.imply_or(vars.cd[[c, d]], instance.slots_of_day(d).map(|h| vars.ch[[c, h]]));
            }
            clauses
        })
        .collect()
}

/// `CH(c,h) -> KH(k,h)` for `c in k` and `KH(k,h) -> OR_{c in k} CH(c,h)`.
pub fn curriculum_links(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    (0..problem.num_curricula())
        .into_par_iter()
        .flat_map_iter(|k| {
            let members = &problem.members[k];
            let mut clauses = Vec::new();
            for h in 0..problem.total_slots() {
                for &c in members {
                    clauses.imply(vars.ch[[c, h]], vars.kh[[k, h]]);
                }
                // An empty curriculum never has a lecture.
                clauses.imply_or(vars.kh[[k, h]], members.iter().map(|&c| vars.ch[[c, h]]));
            }
            clauses
        })
        .collect()
}

/// Room-slot model: `CH(c,h) <=> EXISTS r CHR(c,h,r)` and `CR(c,r) <=> EXISTS h CHR(c,h,r)`.
pub fn room_slot_links(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let chr = match vars.chr.as_ref() {
        Some(chr) => chr,
        None => return Vec::new(),
    };
    let rooms = problem.num_rooms();
    let slots = problem.total_slots();
    (0..problem.num_courses())
        .into_par_iter()
        .flat_map_iter(|c| {
            let mut clauses = Vec::new();
            for h in 0..slots {
                for r in 0..rooms {
                    clauses.imply(chr[[c, h, r]], vars.ch[[c, h]]);
                }
                clauses.imply_or(vars.ch[[c, h]], (0..rooms).map(|r| chr[[c, h, r]]));
            }
            for r in 0..rooms {
                for h in 0..slots {
                    clauses.imply(chr[[c, h, r]], vars.cr[[c, r]]);
                }
                clauses.imply_or(vars.cr[[c, r]], (0..slots).map(|h| chr[[c, h, r]]));
            }
            clauses
        })
        .collect()
}

/// All structural clauses, in a fixed order.
pub fn structural_clauses(problem: &Problem, vars: &Vars) -> Vec<Clause> {
    let ((mut days, curricula), rooms) = rayon::join(
        || rayon::join(|| day_links(problem, vars), || curriculum_links(problem, vars)),
        || room_slot_links(problem, vars),
    );
    days.extend(curricula);
    days.extend(rooms);
    days
}
