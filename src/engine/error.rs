//! Error types for purchase pricing.

use thiserror::Error;

use crate::model::{Category, ProductCode, Quantity};

/// Error from [`calculate`](super::calculate).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid {kind} rule: {reason}")]
    InvalidRule {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("charge for quantity {0} overflows")]
    Overflow(Quantity),
}

/// Error from [`resolve_rules`](super::resolve_rules).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{count} pricing rules match product '{product}'")]
    Ambiguous { product: ProductCode, count: usize },
}

/// Top-level error returned by [`Checkout::quote`](super::Checkout::quote).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("unknown product '{0}'")]
    UnknownProduct(ProductCode),

    #[error("{category} pricing failed: {source}")]
    Pricing {
        category: Category,
        source: PricingError,
    },

    #[error("rule resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("purchase total overflows")]
    TotalOverflow,
}
