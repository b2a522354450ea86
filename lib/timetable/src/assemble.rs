use std::time::Instant;

use log::{debug, info};
use snafu::ensure;

use ctt_sat_core::cnf::Formula;

use crate::clash::clash_clauses;
use crate::emit::Emitter;
use crate::error::*;
use crate::instance::Instance;
use crate::lectures::lecture_counts;
use crate::mode::{Mode, Policies, Weights};
use crate::problem::Problem;
use crate::soft::{lecture_isolation, room_capacity, room_stability, working_days};
use crate::structural::structural_clauses;
use crate::vars::{VarPool, Vars};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EncodeConfig {
    pub mode: Mode,
    pub weights: Weights,
}

impl EncodeConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            weights: Weights::default(),
        }
    }

    pub fn policies(&self) -> Policies {
        self.mode.policies(&self.weights)
    }
}

/// Result of [`encode`]: the formula plus everything needed to read a model back.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub formula: Formula,
    pub pool: VarPool,
    pub vars: Vars,
}

/// Encodes `instance` under `config`.
pub fn encode(instance: &Instance, config: &EncodeConfig) -> Result<Encoded> {
    info!("Using {} mode ({:?})", config.mode, config.weights);
    encode_with(instance, &config.policies())
}

/// Encodes `instance` with an explicit policy for every relaxable goal.
pub fn encode_with(instance: &Instance, policies: &Policies) -> Result<Encoded> {
    let time_start = Instant::now();
    let problem = Problem::new(instance)?;
    let policies = *policies;
    info!(
        "Encoding '{}': {} courses, {} rooms, {} curricula, {} slots",
        instance.name,
        problem.num_courses(),
        problem.num_rooms(),
        problem.num_curricula(),
        problem.total_slots()
    );
    debug!("Policies: {:?}", policies);

    let mut pool = VarPool::new();
    let vars = Vars::allocate(&mut pool, &problem, policies.room_slots)?;
    debug!("Allocated {} problem variables", pool.num_vars());

    let (structural, clashes) = rayon::join(
        || structural_clauses(&problem, &vars),
        || clash_clauses(&problem, &vars),
    );
    debug!(
        "Generated {} structural and {} clash clauses",
        structural.len(),
        clashes.len()
    );

    let mut emitter = Emitter::new(pool);
    emitter.extend_hard(structural);
    emitter.extend_hard(clashes);
    lecture_counts(&problem, &vars, &mut emitter)?;

    room_capacity(&problem, &vars, policies.capacity, &mut emitter);
    room_stability(&problem, &vars, policies.stability, &mut emitter)?;
    working_days(&problem, &vars, policies.working_days, &mut emitter)?;
    lecture_isolation(&problem, &vars, policies.isolation, &mut emitter);

    let (pool, formula) = emitter.finish();
    ensure!(formula.checked_soft_weight().is_some(), WeightOverflowSnafu);
    info!(
        "Encoded {} in {:.3} s",
        formula,
        time_start.elapsed().as_secs_f64()
    );
    Ok(Encoded { formula, pool, vars })
}
