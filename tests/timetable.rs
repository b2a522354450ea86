use test_log::test;

use ctt_sat::core::lit::Lit;
use ctt_sat::core::model::Model;
use ctt_sat::core::oracle::{self, Outcome};
use ctt_sat::core::solver::VarisatSolver;
use ctt_sat::timetable::{
    encode, Course, Curriculum, EncodeConfig, Encoded, Instance, Mode, Room, Unavailability, VarKey,
};

const TOY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/toy.ctt");

fn solve(encoded: &Encoded) -> Outcome {
    let outcome = oracle::solve(&mut VarisatSolver::new(), &encoded.formula);
    if let Outcome::Optimal { model, cost } = &outcome {
        assert!(encoded.formula.is_feasible(model));
        assert_eq!(*cost, encoded.formula.violated_weight(model));
    }
    outcome
}

fn scheduled(encoded: &Encoded, model: &Model, c: usize) -> Vec<usize> {
    (0..encoded.vars.ch.ncols())
        .filter(|&h| model.value(encoded.vars.get(VarKey::Ch(c, h))))
        .collect()
}

/// Two courses of one curriculum, one day with two periods.
fn pair(lectures: usize) -> Instance {
    Instance::new("pair", 1, 2)
        .with_course(Course::new("A", "t1", lectures, 1, 10))
        .with_course(Course::new("B", "t2", lectures, 1, 10))
        .with_room(Room::new("R", 20))
        .with_curriculum(Curriculum::new("K", ["A", "B"]))
}

#[test]
fn test_strict_curriculum_fits() -> color_eyre::Result<()> {
    let encoded = encode(&pair(1), &EncodeConfig::new(Mode::Strict))?;
    assert!(!encoded.formula.is_weighted());
    let outcome = solve(&encoded);
    let model = outcome.model().expect("one lecture each fits in two periods");
    let a = scheduled(&encoded, model, 0);
    let b = scheduled(&encoded, model, 1);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a, b);
    Ok(())
}

#[test]
fn test_strict_curriculum_overflow_is_unsat() -> color_eyre::Result<()> {
    let encoded = encode(&pair(2), &EncodeConfig::new(Mode::Strict))?;
    assert_eq!(solve(&encoded), Outcome::Unsatisfiable);
    Ok(())
}

#[test]
fn test_curriculum_members_take_distinct_slots() -> color_eyre::Result<()> {
    let instance = Instance::new("distinct", 1, 3)
        .with_course(Course::new("A", "t1", 1, 1, 10))
        .with_course(Course::new("B", "t2", 1, 1, 10))
        .with_room(Room::new("R1", 20))
        .with_room(Room::new("R2", 20))
        .with_curriculum(Curriculum::new("K", ["A", "B"]));
    for mode in Mode::ALL {
        let encoded = encode(&instance, &EncodeConfig::new(mode))?;
        let outcome = solve(&encoded);
        let model = outcome.model().expect("satisfiable in every mode");
        for h in 0..instance.total_slots() {
            let a = model.value(encoded.vars.get(VarKey::Ch(0, h)));
            let b = model.value(encoded.vars.get(VarKey::Ch(1, h)));
            assert!(!(a && b), "{}: both courses at slot {}", mode, h);
        }
    }
    Ok(())
}

#[test]
fn test_unrelated_courses_share_a_slot() -> color_eyre::Result<()> {
    let instance = Instance::new("shared", 1, 1)
        .with_course(Course::new("A", "t1", 1, 1, 10))
        .with_course(Course::new("B", "t2", 1, 1, 10))
        .with_room(Room::new("R1", 20))
        .with_room(Room::new("R2", 20));
    let encoded = encode(&instance, &EncodeConfig::new(Mode::Strict))?;
    let outcome = solve(&encoded);
    let model = outcome.model().expect("different teachers, two rooms");
    assert_ne!(
        model.value(encoded.vars.get(VarKey::Cr(0, 0))),
        model.value(encoded.vars.get(VarKey::Cr(1, 0)))
    );

    let same_teacher = Instance::new("shared", 1, 1)
        .with_course(Course::new("A", "t", 1, 1, 10))
        .with_course(Course::new("B", "t", 1, 1, 10))
        .with_room(Room::new("R1", 20))
        .with_room(Room::new("R2", 20));
    let encoded = encode(&same_teacher, &EncodeConfig::new(Mode::Strict))?;
    assert_eq!(solve(&encoded), Outcome::Unsatisfiable);
    Ok(())
}

#[test]
fn test_capacity_cost_per_missing_seat() -> color_eyre::Result<()> {
    let mut instance = pair(1);
    instance.rooms = vec![Room::new("R", 5)];

    let strict = encode(&instance, &EncodeConfig::new(Mode::Strict))?;
    assert_eq!(solve(&strict), Outcome::Unsatisfiable);

    let complete = encode(&instance, &EncodeConfig::default())?;
    // Five missing seats for each of the two lectures.
    assert_eq!(solve(&complete).cost(), Some(10));
    Ok(())
}

#[test]
fn test_working_days_cost_per_missing_day() -> color_eyre::Result<()> {
    let instance = Instance::new("days", 2, 2)
        .with_course(Course::new("A", "t", 2, 2, 10))
        .with_room(Room::new("R", 20))
        .with_unavailability(Unavailability::new("A", 1, 0))
        .with_unavailability(Unavailability::new("A", 1, 1));

    for mode in [Mode::Strict, Mode::Isolation] {
        let encoded = encode(&instance, &EncodeConfig::new(mode))?;
        assert_eq!(solve(&encoded), Outcome::Unsatisfiable, "{}", mode);
    }
    for mode in [Mode::WorkingDays, Mode::Complete] {
        let encoded = encode(&instance, &EncodeConfig::new(mode))?;
        assert_eq!(solve(&encoded).cost(), Some(5), "{}", mode);
    }
    Ok(())
}

#[test]
fn test_isolated_lecture_costs_isolation_weight() -> color_eyre::Result<()> {
    let instance = Instance::new("alone", 1, 3)
        .with_course(Course::new("A", "t", 1, 1, 10))
        .with_room(Room::new("R", 20))
        .with_curriculum(Curriculum::new("K", ["A"]));

    let strict = encode(&instance, &EncodeConfig::new(Mode::Strict))?;
    assert_eq!(solve(&strict), Outcome::Unsatisfiable);

    let mut config = EncodeConfig::new(Mode::Isolation);
    config.weights.isolation = 7;
    let isolation = encode(&instance, &config)?;
    assert_eq!(solve(&isolation).cost(), Some(7));
    Ok(())
}

#[test]
fn test_zero_min_working_days_adds_no_soft_clauses() -> color_eyre::Result<()> {
    let instance = Instance::new("zero", 3, 2)
        .with_course(Course::new("A", "t", 2, 0, 10))
        .with_room(Room::new("R", 20));
    let encoded = encode(&instance, &EncodeConfig::new(Mode::WorkingDays))?;
    assert!(encoded.formula.soft.is_empty());
    assert_eq!(solve(&encoded).cost(), Some(0));
    Ok(())
}

#[test]
fn test_toy_instance() -> color_eyre::Result<()> {
    let instance = Instance::from_file(TOY)?;
    assert_eq!(instance.name, "Toy");
    assert_eq!(instance.courses.len(), 4);
    assert_eq!(instance.rooms.len(), 3);
    assert_eq!(instance.curricula.len(), 2);
    assert_eq!(instance.unavailabilities.len(), 8);
    assert_eq!(instance.total_slots(), 20);
    assert_eq!(instance.total_lectures(), 16);

    // CH 4x20, CD 4x5, CR 4x3, KH 2x20, and CHR 4x20x3 in complete mode.
    for (mode, expected) in [(Mode::Strict, 152), (Mode::Complete, 392)] {
        let encoded = encode(&instance, &EncodeConfig::new(mode))?;
        let problem_vars = encoded.pool.iter().filter(|(_, key)| *key != VarKey::Aux).count();
        assert_eq!(problem_vars, expected, "{}", mode);
    }
    Ok(())
}

#[test]
fn test_no_dangling_variables() -> color_eyre::Result<()> {
    let instance = Instance::from_file(TOY)?;
    for mode in Mode::ALL {
        let encoded = encode(&instance, &EncodeConfig::new(mode))?;
        let formula = &encoded.formula;
        assert_eq!(formula.num_vars, encoded.pool.num_vars());
        assert!(formula.max_var() as usize <= formula.num_vars);
        for var in 1..=formula.num_vars {
            assert!(encoded.pool.key(Lit::from_var(var)).is_some(), "{}: x{}", mode, var);
        }
    }
    Ok(())
}

#[test]
fn test_encoding_is_deterministic() -> color_eyre::Result<()> {
    let instance = Instance::from_file(TOY)?;
    for mode in Mode::ALL {
        let config = EncodeConfig::new(mode);
        let first = encode(&instance, &config)?;
        let second = encode(&instance, &config)?;
        assert_eq!(first.formula, second.formula, "{}", mode);
        assert_eq!(first.formula.wcnf().to_string(), second.formula.wcnf().to_string());
    }
    Ok(())
}
