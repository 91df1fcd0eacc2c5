//! Core domain types for the checkout engine.

use std::collections::HashMap;
use std::fmt;

use crate::Amount;
use crate::engine::PricingError;

/// Customer identifier.
pub type CustomerId = String;

/// Product code, e.g. `classic`.
pub type ProductCode = String;

/// Pricing rule identifier.
pub type RuleId = u32;

/// Number of ads purchased in one category.
pub type Quantity = u32;

/// The three ad categories sold in a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Classic,
    Standout,
    Premium,
}

impl Category {
    /// Every category, in pricing order.
    pub const ALL: [Category; 3] = [Category::Classic, Category::Standout, Category::Premium];

    /// Catalog product code backing this category.
    pub fn code(self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::Standout => "standout",
            Category::Premium => "premium",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    /// Undiscounted unit price.
    pub base_price: Amount,
}

impl Product {
    pub fn new(code: impl Into<ProductCode>, name: impl Into<String>, base_price: Amount) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            base_price,
        }
    }
}

/// A customer who can hold negotiated pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

/// Negotiated pricing strategy for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Every full bundle of `buy` units is billed as `pay_for` units.
    Deal { buy: Quantity, pay_for: Quantity },
    /// Once at least `min_quantity` units are bought, every unit costs `unit_price`.
    Discount {
        min_quantity: Quantity,
        unit_price: Amount,
    },
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Deal { .. } => "deal",
            RuleKind::Discount { .. } => "discount",
        }
    }

    /// Reject rules the calculator cannot evaluate meaningfully.
    ///
    /// `pay_for >= buy` is accepted: it is a degenerate deal, not a broken one.
    pub fn validate(&self) -> Result<(), PricingError> {
        match self {
            RuleKind::Deal { buy: 0, .. } => Err(PricingError::InvalidRule {
                kind: self.name(),
                reason: "bundle size must be positive",
            }),
            RuleKind::Discount { min_quantity: 0, .. } => Err(PricingError::InvalidRule {
                kind: self.name(),
                reason: "minimum quantity must be positive",
            }),
            _ => Ok(()),
        }
    }
}

/// A rule scoped to one (customer, product) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRule {
    pub id: RuleId,
    pub customer: CustomerId,
    pub product: ProductCode,
    pub kind: RuleKind,
}

/// A purchase request: one quantity per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub customer: CustomerId,
    pub classic: Quantity,
    pub standout: Quantity,
    pub premium: Quantity,
}

impl Purchase {
    pub fn new(
        customer: impl Into<CustomerId>,
        classic: Quantity,
        standout: Quantity,
        premium: Quantity,
    ) -> Self {
        Self {
            customer: customer.into(),
            classic,
            standout,
            premium,
        }
    }

    pub fn quantity(&self, category: Category) -> Quantity {
        match category {
            Category::Classic => self.classic,
            Category::Standout => self.standout,
            Category::Premium => self.premium,
        }
    }
}

/// Read-only snapshot of base prices keyed by product code.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    prices: HashMap<ProductCode, Amount>,
}

impl Catalog {
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            prices: products
                .into_iter()
                .map(|product| (product.code, product.base_price))
                .collect(),
        }
    }

    pub fn base_price(&self, code: &str) -> Option<Amount> {
        self.prices.get(code).copied()
    }
}
