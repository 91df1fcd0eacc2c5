use std::fmt;

/// Money amount in minor currency units (cents), stored as an unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    const MINOR_PER_MAJOR: u64 = 100;

    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(value: u64) -> Self {
        Amount(value)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Multiply by a unit count, `None` on overflow.
    pub fn checked_mul(self, units: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(units)).map(Amount)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::MINOR_PER_MAJOR;
        let frac = self.0 % Self::MINOR_PER_MAJOR;
        write!(f, "{whole}.{frac:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_minor_preserves_value() {
        let amount = Amount::from_minor(34999);
        assert_eq!(amount, Amount(34999));
        assert_eq!(amount.minor(), 34999);
    }

    #[test]
    fn display_formats_cents() {
        assert_eq!(Amount::from_minor(34999).to_string(), "349.99");
        assert_eq!(Amount::from_minor(351966).to_string(), "3519.66");
        assert_eq!(Amount::from_minor(5).to_string(), "0.05");
        assert_eq!(Amount::from_minor(0).to_string(), "0.00");
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn checked_mul_scales_by_units() {
        assert_eq!(
            Amount::from_minor(23990).checked_mul(3),
            Some(Amount::from_minor(71970))
        );
        assert_eq!(Amount::from_minor(23990).checked_mul(0), Some(Amount::ZERO));
    }

    #[test]
    fn checked_mul_detects_overflow() {
        assert_eq!(Amount::from_minor(u64::MAX).checked_mul(2), None);
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Amount::from_minor(u64::MAX).checked_add(Amount(1)), None);
        assert_eq!(
            Amount::from_minor(1).checked_add(Amount(2)),
            Some(Amount::from_minor(3))
        );
    }

    #[test]
    fn ordering() {
        assert!(Amount::from_minor(100) < Amount::from_minor(200));
    }
}
