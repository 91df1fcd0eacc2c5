//! Runtime configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// What to do when a purchased category has no catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MissingProduct {
    /// Price the category at zero and log a warning.
    #[default]
    Zero,
    /// Fail the quote with an unknown product error.
    Reject,
}

/// What to do when a customer holds several rules for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DuplicateRules {
    /// Keep the rule seen last, log a warning.
    #[default]
    LastWins,
    /// Fail the quote with an ambiguous rule error.
    Reject,
}

/// Policies consumed by the pricing pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingConfig {
    pub missing_product: MissingProduct,
    pub duplicate_rules: DuplicateRules,
}

impl PricingConfig {
    /// Fail on both missing products and duplicate rules.
    pub fn strict() -> Self {
        Self {
            missing_product: MissingProduct::Reject,
            duplicate_rules: DuplicateRules::Reject,
        }
    }
}

/// Command line configuration of the checkout binary.
#[derive(Debug, Parser)]
#[command(
    name = "ads-checkout",
    about = "Quote job ad purchases against customer pricing rules",
    long_about = None
)]
pub struct Config {
    /// Purchases csv (customer,classic,standout,premium)
    pub purchases: PathBuf,

    /// Product catalog csv (code,name,price)
    #[arg(long, env = "CHECKOUT_PRODUCTS")]
    pub products: PathBuf,

    /// Pricing rules csv (customer,product,kind,buy,pay_for,min_quantity,unit_price)
    #[arg(long, env = "CHECKOUT_RULES")]
    pub rules: Option<PathBuf>,

    /// Behaviour when a purchased product is missing from the catalog
    #[arg(long, env = "CHECKOUT_MISSING_PRODUCT", value_enum, default_value_t = MissingProduct::Zero)]
    pub missing_product: MissingProduct,

    /// Behaviour when a customer has several rules for one product
    #[arg(long, env = "CHECKOUT_DUPLICATE_RULES", value_enum, default_value_t = DuplicateRules::LastWins)]
    pub duplicate_rules: DuplicateRules,
}

impl Config {
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            missing_product: self.missing_product,
            duplicate_rules: self.duplicate_rules,
        }
    }
}
