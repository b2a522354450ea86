use snafu::Snafu;
use totalizer::Totalizer;

use crate::encoder::Encoder;
use crate::lit::Lit;

pub mod totalizer;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum CardinalityError {
    #[snafu(display("Cardinality bound {} over an empty list of literals", bound))]
    EmptyInputs { bound: usize },

    #[snafu(display("Cardinality bound {} exceeds the number of literals ({})", bound, len))]
    BoundTooLarge { bound: usize, len: usize },
}

pub type Result<T, E = CardinalityError> = std::result::Result<T, E>;

fn check_bound(lits: &[Lit], bound: usize) -> Result<()> {
    if lits.is_empty() && bound > 0 {
        return EmptyInputsSnafu { bound }.fail();
    }
    if bound > lits.len() {
        return BoundTooLargeSnafu { bound, len: lits.len() }.fail();
    }
    Ok(())
}

impl<E> Cardinality for E where E: Encoder {}

/// Counting constraints compiled through a [`Totalizer`].
///
/// Bounds are validated before anything is emitted.
pub trait Cardinality: Encoder + Sized {
    fn declare_totalizer(&mut self, input_vars: &[Lit]) -> Totalizer {
        Totalizer::new(self, input_vars)
    }

    /// At least `k` of `lits` are true.
    fn encode_at_least(&mut self, lits: &[Lit], k: usize) -> Result<()> {
        check_bound(lits, k)?;
        if k == 0 {
            return Ok(());
        }
        if k == lits.len() {
            for &lit in lits {
                self.add_clause([lit]);
            }
            return Ok(());
        }
        let mut totalizer = self.declare_totalizer(lits);
        totalizer.declare_lower_bound_greater_than_or_equal(self, k);
        Ok(())
    }

    /// Exactly `k` of `lits` are true.
    fn encode_exactly(&mut self, lits: &[Lit], k: usize) -> Result<()> {
        check_bound(lits, k)?;
        if k == 0 {
            for &lit in lits {
                self.add_clause([-lit]);
            }
            return Ok(());
        }
        if k == lits.len() {
            for &lit in lits {
                self.add_clause([lit]);
            }
            return Ok(());
        }
        let totalizer = self.declare_totalizer(lits);
        self.add_clause([totalizer.at_least(k)]);
        self.add_clause([-totalizer.at_least(k + 1)]);
        Ok(())
    }
}
