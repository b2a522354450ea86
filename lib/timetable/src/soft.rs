//! Relaxable goals, each emitted under a [`Policy`].

use log::warn;
use snafu::ResultExt;

use ctt_sat_core::card::Cardinality;
use ctt_sat_core::lit::Lit;

use crate::emit::Emitter;
use crate::error::*;
use crate::mode::Policy;
use crate::problem::Problem;
use crate::vars::Vars;

/// A curriculum lecture has a lecture of the same curriculum right before or after it.
pub fn lecture_isolation(problem: &Problem, vars: &Vars, policy: Policy, emitter: &mut Emitter) {
    let instance = problem.instance;
    for k in 0..problem.num_curricula() {
        for h in 0..problem.total_slots() {
            let day = instance.slots_of_day(instance.day_of(h));
            let mut clause = vec![-vars.kh[[k, h]]];
            if h > day.start {
                clause.push(vars.kh[[k, h - 1]]);
            }
            if h + 1 < day.end {
                clause.push(vars.kh[[k, h + 1]]);
            }
            // No neighbour within the day.
            if clause.len() == 1 {
                continue;
            }
            emitter.emit(policy, clause);
        }
    }
}

/// Every course spreads over at least `min_working_days` days.
///
/// Soft: one unit `out[j]` per missing day below the minimum, `j` from the
/// minimum down to 2.
pub fn working_days(problem: &Problem, vars: &Vars, policy: Policy, emitter: &mut Emitter) -> Result<()> {
    for (c, course) in problem.instance.courses.iter().enumerate() {
        let min_days = course.min_working_days;
        let lits = vars.cd.row(c).to_vec();

        if policy.is_hard() {
            if min_days > 0 {
                emitter.encode_at_least(&lits, min_days).context(CardinalitySnafu {
                    constraint: "minimum working days",
                    owner: &course.id,
                })?;
            }
            continue;
        }

        if min_days <= 1 {
            continue;
        }
        if min_days > lits.len() {
            warn!(
                "Course '{}' asks for {} working days, only {} exist",
                course.id,
                min_days,
                lits.len()
            );
        }
        let top = min_days.min(lits.len());
        if top < 2 {
            continue;
        }
        let totalizer = emitter.declare_totalizer(&lits);
        for j in (2..=top).rev() {
            emitter.emit(policy, [totalizer.at_least(j)]);
        }
    }
    Ok(())
}

/// Every course stays in one room.
///
/// Soft: the course has at least one room (hard), every additional room costs.
pub fn room_stability(problem: &Problem, vars: &Vars, policy: Policy, emitter: &mut Emitter) -> Result<()> {
    for (c, course) in problem.instance.courses.iter().enumerate() {
        let lits = vars.cr.row(c).to_vec();
        let context = || CardinalitySnafu {
            constraint: "room stability",
            owner: &course.id,
        };

        if policy.is_hard() {
            emitter.encode_exactly(&lits, 1).context(context())?;
            continue;
        }
        // Zero rooms is an error, a single room is simply taken.
        if lits.len() <= 1 {
            emitter.encode_at_least(&lits, 1).context(context())?;
            continue;
        }
        let totalizer = emitter.declare_totalizer(&lits);
        emitter.emit(Policy::Hard, [totalizer.at_least(1)]);
        for i in 2..=totalizer.len() {
            emitter.emit(policy, [-totalizer.at_least(i)]);
        }
    }
    Ok(())
}

/// Rooms too small for a course: forbidden (hard) or charged per missing seat (soft).
///
/// The built-in modes pair a hard policy with the basic model and a soft one
/// with room slots; the other two combinations are reachable through
/// [`encode_with`](crate::assemble::encode_with) and charge per slot (room slots) or per
/// lecture (basic model).
pub fn room_capacity(problem: &Problem, vars: &Vars, policy: Policy, emitter: &mut Emitter) {
    let slots = problem.total_slots();
    for (c, course) in problem.instance.courses.iter().enumerate() {
        for (r, room) in problem.instance.rooms.iter().enumerate() {
            if course.num_students <= room.capacity {
                continue;
            }
            let overflow = (course.num_students - room.capacity) as u64;
            let per_slot: Vec<Lit> = match vars.chr.as_ref() {
                Some(chr) => (0..slots).map(|h| chr[[c, h, r]]).collect(),
                None => Vec::new(),
            };

            if policy.is_hard() {
                if per_slot.is_empty() {
                    emitter.emit(Policy::Hard, [-vars.cr[[c, r]]]);
                } else {
                    for lit in per_slot {
                        emitter.emit(Policy::Hard, [-lit]);
                    }
                }
            } else if vars.has_room_slots() {
                for lit in per_slot {
                    emitter.emit(policy.scaled(overflow), [-lit]);
                }
            } else {
                let lectures = course.num_lectures as u64;
                emitter.emit(policy.scaled(overflow).scaled(lectures), [-vars.cr[[c, r]]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ctt_sat_core::clause::Clause;
    use ctt_sat_core::cnf::Formula;
    use test_log::test;

    use super::*;
    use crate::instance::{Course, Curriculum, Instance, Room};
    use crate::vars::{VarKey, VarPool};

    fn run<F>(instance: &Instance, room_slots: bool, f: F) -> color_eyre::Result<(Vars, Formula)>
    where
        F: FnOnce(&Problem, &Vars, &mut Emitter) -> Result<()>,
    {
        let problem = Problem::new(instance)?;
        let mut pool = VarPool::new();
        let vars = Vars::allocate(&mut pool, &problem, room_slots)?;
        let mut emitter = Emitter::new(pool);
        f(&problem, &vars, &mut emitter)?;
        let (_, formula) = emitter.finish();
        Ok((vars, formula))
    }

    #[test]
    fn test_isolation_neighbours_within_day() -> color_eyre::Result<()> {
        let instance = Instance::new("i", 2, 3).with_curriculum(Curriculum::new("K", Vec::<String>::new()));
        let (vars, formula) = run(&instance, false, |p, v, e| {
            lecture_isolation(p, v, Policy::Soft(2), e);
            Ok(())
        })?;
        let kh = |h| vars.get(VarKey::Kh(0, h));
        assert_eq!(formula.soft.len(), 6);
        assert!(formula.soft.iter().all(|(w, _)| *w == 2));
        let clauses: Vec<Clause> = formula.soft.into_iter().map(|(_, c)| c).collect();
        assert!(clauses.contains(&Clause::new(vec![-kh(0), kh(1)])));
        assert!(clauses.contains(&Clause::new(vec![-kh(1), kh(0), kh(2)])));
        // Last slot of day 0 does not look at day 1.
        assert!(clauses.contains(&Clause::new(vec![-kh(2), kh(1)])));
        assert!(clauses.contains(&Clause::new(vec![-kh(3), kh(4)])));
        Ok(())
    }

    #[test]
    fn test_isolation_single_period_days() -> color_eyre::Result<()> {
        let instance = Instance::new("i", 3, 1).with_curriculum(Curriculum::new("K", Vec::<String>::new()));
        let (_, formula) = run(&instance, false, |p, v, e| {
            lecture_isolation(p, v, Policy::Hard, e);
            Ok(())
        })?;
        assert!(formula.hard.is_empty());
        Ok(())
    }

    #[test]
    fn test_working_days_soft_thresholds() -> color_eyre::Result<()> {
        let instance = Instance::new("w", 4, 1)
            .with_course(Course::new("A", "t", 4, 3, 0))
            .with_course(Course::new("B", "t", 1, 0, 0))
            .with_course(Course::new("C", "t", 1, 1, 0));
        let (_, formula) = run(&instance, false, |p, v, e| working_days(p, v, Policy::Soft(5), e))?;
        // A: out[3], out[2]; B and C: nothing
        assert_eq!(formula.soft.len(), 2);
        assert!(formula.soft.iter().all(|(w, c)| *w == 5 && c.len() == 1));
        Ok(())
    }

    #[test]
    fn test_working_days_zero_minimum_emits_nothing() -> color_eyre::Result<()> {
        let instance = Instance::new("w", 3, 2).with_course(Course::new("A", "t", 2, 0, 0));
        let (_, hard) = run(&instance, false, |p, v, e| working_days(p, v, Policy::Hard, e))?;
        let (_, soft) = run(&instance, false, |p, v, e| working_days(p, v, Policy::Soft(5), e))?;
        assert_eq!(hard.num_clauses(), 0);
        assert_eq!(soft.num_clauses(), 0);
        Ok(())
    }

    #[test]
    fn test_working_days_clamped_to_num_days() -> color_eyre::Result<()> {
        let instance = Instance::new("w", 2, 3).with_course(Course::new("A", "t", 2, 5, 0));
        let (_, formula) = run(&instance, false, |p, v, e| working_days(p, v, Policy::Soft(5), e))?;
        assert_eq!(formula.soft.len(), 1);
        Ok(())
    }

    #[test]
    fn test_room_stability_soft() -> color_eyre::Result<()> {
        let instance = Instance::new("r", 1, 1)
            .with_course(Course::new("A", "t", 1, 0, 0))
            .with_room(Room::new("R1", 1))
            .with_room(Room::new("R2", 1))
            .with_room(Room::new("R3", 1));
        let (_, formula) = run(&instance, false, |p, v, e| room_stability(p, v, Policy::Soft(1), e))?;
        // not out[2], not out[3]
        assert_eq!(formula.soft.len(), 2);
        assert!(formula.soft.iter().all(|(_, c)| c.len() == 1 && !c.lits[0].is_positive()));
        Ok(())
    }

    #[test]
    fn test_room_stability_single_room_is_hard_unit() -> color_eyre::Result<()> {
        let instance = Instance::new("r", 1, 1)
            .with_course(Course::new("A", "t", 1, 0, 0))
            .with_room(Room::new("R1", 1));
        let (vars, formula) = run(&instance, false, |p, v, e| room_stability(p, v, Policy::Soft(1), e))?;
        assert_eq!(formula.hard, vec![Clause::new(vec![vars.get(VarKey::Cr(0, 0))])]);
        assert!(formula.soft.is_empty());
        Ok(())
    }

    #[test]
    fn test_room_capacity_weights() -> color_eyre::Result<()> {
        let instance = Instance::new("c", 1, 2)
            .with_course(Course::new("A", "t", 2, 0, 50))
            .with_room(Room::new("Small", 40))
            .with_room(Room::new("Big", 60));

        let (vars, basic) = run(&instance, false, |p, v, e| {
            room_capacity(p, v, Policy::Soft(1), e);
            Ok(())
        })?;
        assert_eq!(basic.soft, vec![(20, Clause::new(vec![-vars.get(VarKey::Cr(0, 0))]))]);

        let (vars, complete) = run(&instance, true, |p, v, e| {
            room_capacity(p, v, Policy::Soft(1), e);
            Ok(())
        })?;
        assert_eq!(
            complete.soft,
            vec![
                (10, Clause::new(vec![-vars.get(VarKey::Chr(0, 0, 0))])),
                (10, Clause::new(vec![-vars.get(VarKey::Chr(0, 1, 0))])),
            ]
        );

        let (vars, hard) = run(&instance, false, |p, v, e| {
            room_capacity(p, v, Policy::Hard, e);
            Ok(())
        })?;
        assert_eq!(hard.hard, vec![Clause::new(vec![-vars.get(VarKey::Cr(0, 0))])]);

        let (vars, hard_slots) = run(&instance, true, |p, v, e| {
            room_capacity(p, v, Policy::Hard, e);
            Ok(())
        })?;
        assert_eq!(
            hard_slots.hard,
            vec![
                Clause::new(vec![-vars.get(VarKey::Chr(0, 0, 0))]),
                Clause::new(vec![-vars.get(VarKey::Chr(0, 1, 0))]),
            ]
        );
        assert!(hard_slots.soft.is_empty());
        Ok(())
    }
}
