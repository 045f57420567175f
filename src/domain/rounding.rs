//! Explicit rounding direction for integer division.

/// Rounding direction for every division the engine performs.
///
/// There is no implicit rounding anywhere in the crate: each division
/// names its direction, and the direction always favours the pool.
///
/// | Quantity | Direction |
/// |----------|-----------|
/// | Swap output, withdrawal amounts, minted shares | [`Rounding::Down`] |
/// | Required input, ratio-matched deposit side, price impact | [`Rounding::Up`] |
///
/// # Examples
///
/// ```
/// use twinpool::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Up.is_down());
        assert!(Rounding::Down.is_down());
        assert!(!Rounding::Down.is_up());
    }
}
