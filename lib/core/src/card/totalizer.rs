//! Totalizer from [[`1`]].
//!
//! [[`1`]] O. Bailleux and Y. Boufkhad, _"Efficient CNF encoding of Boolean cardinality constraints,"_ in Principles and Practice of Constraint Programming, 2003, pp. 108–122.
//!
//! [`1`]: https://doi.org/10.1007/978-3-540-45193-8_8

use std::collections::VecDeque;

use crate::encoder::Encoder;
use crate::lit::Lit;

/// Unary counter over a list of input literals.
///
/// `output_vars[i - 1]` is true iff at least `i` inputs are true, for `i` in `1..=n`.
/// The trivial output "at least 0" is not materialised.
#[derive(Debug, Clone)]
pub struct Totalizer {
    pub output_vars: Vec<Lit>,
    declared_lower_bound: Option<usize>,
    declared_upper_bound: Option<usize>,
}

impl Totalizer {
    pub fn new<E>(encoder: &mut E, input_vars: &[Lit]) -> Self
    where
        E: Encoder,
    {
        assert!(!input_vars.is_empty(), "totalizer needs at least one input");

        // A single input counts itself.
        if input_vars.len() == 1 {
            return Self::with_outputs(input_vars.to_vec());
        }

        let output_vars = encoder.new_var_vec(input_vars.len());
        let mut queue = VecDeque::from([(input_vars, output_vars.clone())]);

        while let Some((leaves, r)) = queue.pop_front() {
            let m = leaves.len();
            if m == 1 {
                continue;
            }

            let (left, right) = leaves.split_at(m / 2);
            let m1 = left.len();
            let m2 = right.len();

            let a = if m1 > 1 { encoder.new_var_vec(m1) } else { vec![left[0]] };
            let b = if m2 > 1 { encoder.new_var_vec(m2) } else { vec![right[0]] };

            for alpha in 0..=m1 {
                for beta in 0..=m2 {
                    let sigma = alpha + beta;

                    // (a >= alpha) & (b >= beta) -> (r >= sigma)
                    let c1 = if sigma == 0 {
                        None
                    } else if alpha == 0 {
                        Some(vec![-b[beta - 1], r[sigma - 1]])
                    } else if beta == 0 {
                        Some(vec![-a[alpha - 1], r[sigma - 1]])
                    } else {
                        Some(vec![-a[alpha - 1], -b[beta - 1], r[sigma - 1]])
                    };
                    // (a < alpha + 1) & (b < beta + 1) -> (r < sigma + 1)
                    let c2 = if sigma == m {
                        None
                    } else if alpha == m1 {
                        Some(vec![b[beta], -r[sigma]])
                    } else if beta == m2 {
                        Some(vec![a[alpha], -r[sigma]])
                    } else {
                        Some(vec![a[alpha], b[beta], -r[sigma]])
                    };

                    if let Some(c) = c1 {
                        encoder.add_clause(c);
                    }
                    if let Some(c) = c2 {
                        encoder.add_clause(c);
                    }
                }
            }

            queue.push_front((right, b));
            queue.push_front((left, a));
        }

        Self::with_outputs(output_vars)
    }

    fn with_outputs(output_vars: Vec<Lit>) -> Self {
        Self {
            output_vars,
            declared_lower_bound: None,
            declared_upper_bound: None,
        }
    }

    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.output_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output_vars.is_empty()
    }

    /// Literal meaning "at least `i` inputs are true", `1 <= i <= n`.
    pub fn at_least(&self, i: usize) -> Lit {
        assert!(
            i >= 1 && i <= self.len(),
            "threshold {} is outside of 1..={}",
            i,
            self.len()
        );
        self.output_vars[i - 1]
    }

    pub fn declare_upper_bound_less_than<E>(&mut self, encoder: &mut E, new_ub: usize)
    where
        E: Encoder,
    {
        if let Some(cur_ub) = self.declared_upper_bound {
            assert!(
                new_ub < cur_ub,
                "New upper bound must be less than the current one (new_ub = {}, cur_ub = {})",
                new_ub,
                cur_ub
            );
        }

        self.declare_comparator_less_than(encoder, new_ub);
    }

    pub fn declare_upper_bound_less_than_or_equal<E>(&mut self, encoder: &mut E, new_ub: usize)
    where
        E: Encoder,
    {
        self.declare_upper_bound_less_than(encoder, new_ub + 1);
    }

    pub fn declare_lower_bound_greater_than_or_equal<E>(&mut self, encoder: &mut E, new_lb: usize)
    where
        E: Encoder,
    {
        if let Some(cur_lb) = self.declared_lower_bound {
            assert!(
                new_lb >= cur_lb,
                "New lower bound must be greater or equal to the current one (new_lb = {}, cur_lb = {})",
                new_lb,
                cur_lb
            );
        }

        self.declare_comparator_greater_than_or_equal(encoder, new_lb);
    }

    fn declare_comparator_less_than<E>(&mut self, encoder: &mut E, ub: usize)
    where
        E: Encoder,
    {
        assert!(ub >= 1, "count can't be below zero");
        // `count < n + 1` always holds.
        if ub > self.len() {
            return;
        }

        let max = self.declared_upper_bound.replace(ub).unwrap_or(self.len() + 1);
        for i in (ub..max).rev() {
            encoder.add_clause([-self.at_least(i)]);
        }
    }

    fn declare_comparator_greater_than_or_equal<E>(&mut self, encoder: &mut E, lb: usize)
    where
        E: Encoder,
    {
        assert!(lb <= self.len(), "lower bound {} exceeds {} inputs", lb, self.len());

        let min = self.declared_lower_bound.replace(lb).map_or(1, |cur| cur + 1);
        for i in min.max(1)..=lb {
            encoder.add_clause([self.at_least(i)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::encoder::CnfEncoder;
    use crate::op::ops::AddClause;
    use crate::solver::{SolveResponse, Solver, VarisatSolver};
    use crate::utils::load_hard;

    #[test]
    fn test_totalizer_output() {
        let mut e = CnfEncoder::new(0);
        let n = 11;
        let lits = e.new_var_vec(n);
        let t = Totalizer::new(&mut e, &lits);
        assert_eq!(t.output_vars.len(), lits.len());
        assert_eq!(
            t.output_vars.iter().map(|lit| lit.get()).collect_vec(),
            ((n + 1) as i32..=(n + n) as i32).collect_vec()
        );
    }

    #[test]
    fn test_single_input_is_identity() {
        let mut e = CnfEncoder::new(0);
        let x = e.new_var();
        let t = Totalizer::new(&mut e, &[x]);
        assert_eq!(t.at_least(1), x);
        assert_eq!(e.num_vars, 1);
        assert!(e.clauses.is_empty());
    }

    #[test]
    fn test_incremental_bounds() {
        let mut e = CnfEncoder::new(0);
        let lits = e.new_var_vec(4);
        let mut t = Totalizer::new(&mut e, &lits);
        let before = e.clauses.len();
        t.declare_upper_bound_less_than_or_equal(&mut e, 2);
        assert_eq!(e.clauses.len(), before + 2);
        t.declare_upper_bound_less_than_or_equal(&mut e, 1);
        assert_eq!(e.clauses.len(), before + 3);
        t.declare_lower_bound_greater_than_or_equal(&mut e, 1);
        assert_eq!(e.clauses.len(), before + 4);
    }

    #[quickcheck]
    fn prop_outputs_are_exact(inputs: Vec<bool>) -> TestResult {
        if inputs.is_empty() || inputs.len() > 9 {
            return TestResult::discard();
        }
        let mut e = CnfEncoder::new(0);
        let lits = e.new_var_vec(inputs.len());
        let t = Totalizer::new(&mut e, &lits);
        for (&lit, &value) in lits.iter().zip(inputs.iter()) {
            e.add_clause([if value { lit } else { -lit }]);
        }

        let mut solver = VarisatSolver::new();
        load_hard(&mut solver, &e.into_formula());
        if solver.solve() != SolveResponse::Sat {
            return TestResult::failed();
        }
        let count = inputs.iter().filter(|&&x| x).count();
        let exact = (1..=inputs.len()).all(|i| solver.value(t.at_least(i)).bool() == (count >= i));
        TestResult::from_bool(exact)
    }
}
