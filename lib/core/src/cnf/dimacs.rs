use std::fmt::{Display, Formatter};

use crate::clause::Clause;

use super::Formula;

/// DIMACS CNF view of the hard part of a [`Formula`].
pub struct Dimacs<'a>(pub(super) &'a Formula);

/// Classic WCNF view (`p wcnf <vars> <clauses> <top>`); hard clauses carry `top`.
pub struct Wcnf<'a>(pub(super) &'a Formula);

fn write_clause(f: &mut Formatter<'_>, clause: &Clause) -> std::fmt::Result {
    for lit in clause.iter() {
        write!(f, "{} ", lit)?;
    }
    writeln!(f, "0")
}

impl Display for Dimacs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formula = self.0;
        writeln!(f, "p cnf {} {}", formula.num_vars, formula.hard.len())?;
        for clause in formula.hard.iter() {
            write_clause(f, clause)?;
        }
        Ok(())
    }
}

impl Display for Wcnf<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formula = self.0;
        let top = formula.total_soft_weight().saturating_add(1);
        writeln!(f, "p wcnf {} {} {}", formula.num_vars, formula.num_clauses(), top)?;
        for clause in formula.hard.iter() {
            write!(f, "{} ", top)?;
            write_clause(f, clause)?;
        }
        for (weight, clause) in formula.soft.iter() {
            write!(f, "{} ", weight)?;
            write_clause(f, clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dimacs::{parse_dimacs, Instance, Sign};

    use super::*;

    fn sample() -> Formula {
        let mut formula = Formula::with_num_vars(3);
        formula.add_hard([1, -2]);
        formula.add_hard([3]);
        formula.add_soft(4, [-1]);
        formula
    }

    #[test]
    fn test_dimacs_is_parseable() -> color_eyre::Result<()> {
        let text = sample().dimacs().to_string();
        let instance = parse_dimacs(&text).map_err(|e| color_eyre::eyre::eyre!("{:?}", e))?;
        match instance {
            Instance::Cnf { num_vars, clauses } => {
                assert_eq!(num_vars, 3);
                let clauses: Vec<Vec<i64>> = clauses
                    .iter()
                    .map(|c| {
                        c.lits()
                            .iter()
                            .map(|x| {
                                let v = x.var().to_u64() as i64;
                                match x.sign() {
                                    Sign::Pos => v,
                                    Sign::Neg => -v,
                                }
                            })
                            .collect()
                    })
                    .collect();
                assert_eq!(clauses, vec![vec![1, -2], vec![3]]);
            }
            other => panic!("expected a CNF instance, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_wcnf_layout() {
        let text = sample().wcnf().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["p wcnf 3 3 5", "5 1 -2 0", "5 3 0", "4 -1 0"]);
    }
}
