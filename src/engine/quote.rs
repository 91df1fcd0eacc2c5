use crate::Amount;
use crate::model::{Category, CustomerId, Quantity, RuleKind};

/// Charge for one category of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCharge {
    pub category: Category,
    pub quantity: Quantity,
    pub base_price: Amount,
    /// Rule applied to this line, `None` for standard pricing or skipped lines.
    pub rule: Option<RuleKind>,
    pub charge: Amount,
}

impl LineCharge {
    /// A category that was not purchased.
    pub fn skipped(category: Category) -> Self {
        Self {
            category,
            quantity: 0,
            base_price: Amount::ZERO,
            rule: None,
            charge: Amount::ZERO,
        }
    }
}

/// Priced purchase with its per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub customer: CustomerId,
    /// One line per category, in pricing order.
    pub lines: Vec<LineCharge>,
    pub total: Amount,
}

impl Quote {
    pub fn charge(&self, category: Category) -> Amount {
        self.lines
            .iter()
            .find(|line| line.category == category)
            .map_or(Amount::ZERO, |line| line.charge)
    }
}
