use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Signed DIMACS literal: `+v` is variable `v`, `-v` is its negation.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Lit(i32);

impl Lit {
    pub const fn new(val: i32) -> Self {
        debug_assert!(val != 0, "literal must not be zero");
        Lit(val)
    }

    /// Positive literal of the 1-based variable `var`.
    pub fn from_var(var: usize) -> Self {
        assert!(
            var >= 1 && var <= i32::MAX as usize,
            "variable {} is outside of the literal range",
            var
        );
        Lit(var as i32)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn var(self) -> u32 {
        self.get().unsigned_abs()
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl<L> From<&L> for Lit
where
    L: Into<Lit> + Copy,
{
    fn from(val: &L) -> Self {
        (*val).into()
    }
}

impl From<i32> for Lit {
    fn from(val: i32) -> Self {
        Self::new(val)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.get()
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_from_var() {
        let lit = Lit::from_var(7);
        assert_eq!(lit.get(), 7);
        assert_eq!(lit.var(), 7);
        assert!(lit.is_positive());
    }

    #[test]
    #[should_panic]
    fn test_lit_from_var_zero() {
        let _ = Lit::from_var(0);
    }

    #[test]
    fn test_lit_display() {
        assert_eq!(format!("{}", Lit::new(-42)), "-42");
    }

    #[test]
    fn test_lit_conversions() {
        let lit: Lit = (&42).into();
        assert_eq!(lit.get(), 42);
        let value: i32 = lit.into();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_lit_neg() {
        let lit = Lit::new(42);
        assert_eq!((-lit).get(), -42);
        assert_eq!((-lit).var(), 42);
        assert!(!(-lit).is_positive());
        assert_eq!(-(-lit), lit);
    }
}
