use std::collections::HashMap;

use tracing::warn;

use crate::config::DuplicateRules;
use crate::model::PricingRule;

use super::ResolveError;

/// Map each product code to the one rule that applies to it.
///
/// `rules` must all belong to the same customer. When several rules target the
/// same product, `DuplicateRules::LastWins` keeps the last one in iteration
/// order and `DuplicateRules::Reject` fails. Either way the collision is logged.
pub fn resolve_rules(
    rules: &[PricingRule],
    policy: DuplicateRules,
) -> Result<HashMap<&str, &PricingRule>, ResolveError> {
    let mut resolved: HashMap<&str, &PricingRule> = HashMap::with_capacity(rules.len());

    for rule in rules {
        let Some(replaced) = resolved.insert(rule.product.as_str(), rule) else {
            continue;
        };

        warn!(
            customer = %rule.customer,
            product = %rule.product,
            replaced = replaced.id,
            kept = rule.id,
            "duplicate pricing rule"
        );

        if policy == DuplicateRules::Reject {
            let count = rules.iter().filter(|r| r.product == rule.product).count();
            return Err(ResolveError::Ambiguous {
                product: rule.product.clone(),
                count,
            });
        }
    }

    Ok(resolved)
}
