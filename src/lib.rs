pub mod amount;
pub mod config;
pub mod csv;
pub mod engine;
pub mod model;
pub mod store;

pub use amount::Amount;
pub use config::{Config, PricingConfig};
pub use engine::{Checkout, Quote, calculate, quote_purchase, resolve_rules};
pub use model::{Category, CustomerId, PricingRule, Product, Purchase, Quantity, RuleKind};
pub use store::{CatalogStore, MemoryStore, RuleStore};
