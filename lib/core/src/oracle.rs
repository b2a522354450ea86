//! Solving a [`Formula`] with a [`Solver`].
//!
//! Formulas without soft clauses are decided with a single SAT call. Weighted
//! formulas go through a linear SAT-UNSAT search: every soft clause receives a
//! relaxation literal, a totalizer counts the weight-expanded relaxation
//! literals, and each model of cost `c` is followed by the bound `cost < c`
//! until the oracle answers UNSAT.

use std::fmt::{Display, Formatter};
use std::iter;

use log::{debug, info, warn};

use crate::card::Cardinality;
use crate::cnf::Formula;
use crate::encoder::{CnfEncoder, Encoder};
use crate::lit::Lit;
use crate::model::Model;
use crate::op::ops::AddClause;
use crate::solver::{SolveResponse, Solver};
use crate::utils::{load_hard, type_name_of};

/// Largest total soft weight the linear search expands into unit-weight inputs.
pub const WEIGHT_EXPANSION_LIMIT: u64 = 1 << 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The hard clauses hold in `model` and no model has a smaller `cost`.
    Optimal { model: Model, cost: u64 },
    Unsatisfiable,
    Unknown,
}

impl Outcome {
    pub fn model(&self) -> Option<&Model> {
        match self {
            Outcome::Optimal { model, .. } => Some(model),
            _ => None,
        }
    }

    pub fn cost(&self) -> Option<u64> {
        match self {
            Outcome::Optimal { cost, .. } => Some(*cost),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Optimal { cost, .. } => write!(f, "OPTIMUM (cost = {})", cost),
            Outcome::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Outcome::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Solves `formula` on a fresh `solver`.
pub fn solve<S>(solver: &mut S, formula: &Formula) -> Outcome
where
    S: Solver,
{
    info!("Solving {} with {}", formula, type_name_of(&*solver));
    if formula.is_weighted() {
        solve_weighted(solver, formula)
    } else {
        solve_plain(solver, formula)
    }
}

fn solve_plain<S>(solver: &mut S, formula: &Formula) -> Outcome
where
    S: Solver,
{
    load_hard(solver, formula);
    match solver.solve() {
        SolveResponse::Sat => Outcome::Optimal {
            model: Model::from_solver(solver, formula.num_vars),
            cost: 0,
        },
        SolveResponse::Unsat => Outcome::Unsatisfiable,
        SolveResponse::Unknown => Outcome::Unknown,
    }
}

/// Feeds the bounds of an incremental totalizer straight into the solver.
struct SolverEncoder<'s, S>(&'s mut S);

impl<S> AddClause for SolverEncoder<'_, S>
where
    S: Solver,
{
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.0.add_clause(lits);
    }
}

impl<S> Encoder for SolverEncoder<'_, S>
where
    S: Solver,
{
    fn new_var(&mut self) -> Lit {
        self.0.new_var()
    }

    fn num_vars(&self) -> usize {
        self.0.num_vars()
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn solve_weighted<S>(solver: &mut S, formula: &Formula) -> Outcome
where
    S: Solver,
{
    let total = match formula.checked_soft_weight() {
        Some(total) => total,
        None => {
            warn!("Total soft weight does not fit in 64 bits");
            return Outcome::Unknown;
        }
    };
    // Every cost is a multiple of the common divisor, so the counter works in its units.
    let unit = formula.soft.iter().fold(0, |acc, (w, _)| gcd(acc, *w)).max(1);
    if total / unit > WEIGHT_EXPANSION_LIMIT {
        warn!(
            "Total soft weight {} (in units of {}) exceeds the expansion limit {}",
            total, unit, WEIGHT_EXPANSION_LIMIT
        );
        return Outcome::Unknown;
    }

    let mut encoder = CnfEncoder::new(formula.num_vars);
    encoder.clauses.extend(formula.hard.iter().cloned());
    let mut relaxed = Vec::with_capacity((total / unit) as usize);
    for (weight, clause) in formula.soft.iter() {
        let b = encoder.new_var();
        encoder.add_clause(clause.iter().copied().chain(iter::once(b)));
        relaxed.extend(iter::repeat(b).take((*weight / unit) as usize));
    }
    let mut totalizer = encoder.declare_totalizer(&relaxed);
    debug!(
        "Relaxed {} soft clauses into {} counter inputs, {} auxiliary variables",
        formula.soft.len(),
        relaxed.len(),
        encoder.num_vars - formula.num_vars
    );
    load_hard(solver, &encoder.into_formula());

    let mut best: Option<(Model, u64)> = None;
    loop {
        match solver.solve() {
            SolveResponse::Sat => {
                let model = Model::from_solver(solver, formula.num_vars);
                let cost = formula.violated_weight(&model);
                info!("Found a model of cost {}", cost);
                best = Some((model, cost));
                if cost == 0 {
                    break;
                }
                totalizer.declare_upper_bound_less_than(&mut SolverEncoder(&mut *solver), (cost / unit) as usize);
            }
            SolveResponse::Unsat => break,
            SolveResponse::Unknown => {
                if let Some((_, cost)) = best {
                    warn!("Oracle gave up, best cost so far is {}", cost);
                }
                return Outcome::Unknown;
            }
        }
    }

    match best {
        Some((model, cost)) => Outcome::Optimal { model, cost },
        None => Outcome::Unsatisfiable,
    }
}
