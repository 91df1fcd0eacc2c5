//! Purchase pricing engine.
//!
//! For every category of a purchase the engine resolves the customer's rule,
//! looks up the catalog base price and computes the charge. The pricing
//! functions are pure; [`Checkout`] only fetches the catalog and rule snapshots
//! from its store before calling them, so it can be shared across tasks, and
//! [`Checkout::run`] quotes a stream of purchases.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::config::{MissingProduct, PricingConfig};
use crate::model::{Catalog, Category, PricingRule, Purchase};
use crate::store::{CatalogStore, RuleStore};

mod calculator;
pub use calculator::calculate;

mod resolver;
pub use resolver::resolve_rules;

mod quote;
pub use quote::{LineCharge, Quote};

mod error;
pub use error::{PricingError, QuoteError, ResolveError};

/// Price a purchase against already-fetched catalog and rule snapshots.
///
/// `rules` must belong to the purchasing customer.
pub fn quote_purchase(
    purchase: &Purchase,
    catalog: &Catalog,
    rules: &[PricingRule],
    config: &PricingConfig,
) -> Result<Quote, QuoteError> {
    let resolved = resolve_rules(rules, config.duplicate_rules)?;

    let mut lines = Vec::with_capacity(Category::ALL.len());
    let mut total = Amount::ZERO;

    for category in Category::ALL {
        let quantity = purchase.quantity(category);
        if quantity == 0 {
            lines.push(LineCharge::skipped(category));
            continue;
        }

        let base_price = match (catalog.base_price(category.code()), config.missing_product) {
            (Some(price), _) => price,
            (None, MissingProduct::Zero) => {
                warn!(
                    customer = %purchase.customer,
                    product = category.code(),
                    "product missing from catalog, pricing at zero"
                );
                Amount::ZERO
            }
            (None, MissingProduct::Reject) => {
                return Err(QuoteError::UnknownProduct(category.code().to_string()));
            }
        };

        let rule = resolved.get(category.code()).map(|rule| rule.kind);
        let charge = calculate(rule.as_ref(), quantity, base_price)
            .map_err(|source| QuoteError::Pricing { category, source })?;
        total = total
            .checked_add(charge)
            .ok_or(QuoteError::TotalOverflow)?;

        lines.push(LineCharge {
            category,
            quantity,
            base_price,
            rule,
            charge,
        });
    }

    Ok(Quote {
        customer: purchase.customer.clone(),
        lines,
        total,
    })
}

/// Quotes purchases against the catalog and rules held by a store.
#[derive(Debug)]
pub struct Checkout<S> {
    store: S,
    config: PricingConfig,
}

/// Public API
impl<S: CatalogStore + RuleStore> Checkout<S> {
    pub fn new(store: S, config: PricingConfig) -> Self {
        Self { store, config }
    }

    /// Quote a single purchase with the current catalog and rules
    pub fn quote(&self, purchase: &Purchase) -> Result<Quote, QuoteError> {
        let catalog = Catalog::from_products(self.store.products());
        let rules = self.store.rules_for_customer(&purchase.customer);

        let result = quote_purchase(purchase, &catalog, &rules, &self.config);
        Self::log_result(purchase, &result);
        result
    }

    /// Quote every purchase of the stream. Failed purchases are skipped.
    pub async fn run(&self, mut stream: impl Stream<Item = Purchase> + Unpin) -> Vec<Quote> {
        let mut quotes = Vec::new();
        while let Some(purchase) = stream.next().await {
            // any error should not stop the checkout, it has been logged already
            if let Ok(quote) = self.quote(&purchase) {
                quotes.push(quote);
            }
        }
        quotes
    }
}

/// Private API
impl<S> Checkout<S> {
    fn log_result(purchase: &Purchase, result: &Result<Quote, QuoteError>) {
        match result {
            Ok(quote) => {
                info!(
                    customer = %purchase.customer,
                    classic = purchase.classic,
                    standout = purchase.standout,
                    premium = purchase.premium,
                    total = %quote.total,
                    "purchase quoted"
                );
            }
            Err(e) => {
                warn!(
                    customer = %purchase.customer,
                    classic = purchase.classic,
                    standout = purchase.standout,
                    premium = purchase.premium,
                    reason = %e,
                    "purchase skipped"
                );
            }
        }
    }
}
