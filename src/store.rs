//! Catalog, customer and rule storage.
//!
//! The checkout only reads through [`CatalogStore`] and [`RuleStore`]; the
//! CRUD operations on [`MemoryStore`] are for whoever owns the data.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::Amount;
use crate::engine::PricingError;
use crate::model::{Customer, CustomerId, PricingRule, Product, ProductCode, RuleId, RuleKind};

/// Read access to the product catalog.
pub trait CatalogStore {
    fn products(&self) -> Vec<Product>;

    fn product(&self, code: &str) -> Option<Product>;
}

/// Read access to negotiated pricing rules.
pub trait RuleStore {
    /// Rules held by `customer`, in creation order.
    fn rules_for_customer(&self, customer: &str) -> Vec<PricingRule>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} '{key}' already exists")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    InvalidRule(#[from] PricingError),
}

impl StoreError {
    fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    fn already_exists(entity: &'static str, key: impl ToString) -> Self {
        StoreError::AlreadyExists {
            entity,
            key: key.to_string(),
        }
    }
}

/// In-process store holding products, customers and rules.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: HashMap<ProductCode, Product>,
    customers: Vec<Customer>,
    /// Kept in creation order so duplicate resolution is deterministic.
    rules: Vec<PricingRule>,
    next_customer_id: u32,
    next_rule_id: RuleId,
}

/// Products
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_product(&mut self, product: Product) -> Result<(), StoreError> {
        if self.products.contains_key(&product.code) {
            return Err(StoreError::already_exists("product", &product.code));
        }
        debug!(code = %product.code, price = %product.base_price, "product created");
        self.products.insert(product.code.clone(), product);
        Ok(())
    }

    /// Change name and base price; the code is the product's identity.
    pub fn update_product(
        &mut self,
        code: &str,
        name: impl Into<String>,
        base_price: Amount,
    ) -> Result<Product, StoreError> {
        let product = self
            .products
            .get_mut(code)
            .ok_or_else(|| StoreError::not_found("product", code))?;
        product.name = name.into();
        product.base_price = base_price;
        Ok(product.clone())
    }

    pub fn delete_product(&mut self, code: &str) -> Result<Product, StoreError> {
        self.products
            .remove(code)
            .ok_or_else(|| StoreError::not_found("product", code))
    }
}

/// Customers
impl MemoryStore {
    /// Register a customer under a fresh id. Names are unique.
    pub fn create_customer(&mut self, name: impl Into<String>) -> Result<Customer, StoreError> {
        let name = name.into();
        if self.customers.iter().any(|c| c.name == name) {
            return Err(StoreError::already_exists("customer", name));
        }

        self.next_customer_id += 1;
        let customer = Customer {
            id: self.next_customer_id.to_string(),
            name,
        };
        self.customers.push(customer.clone());
        Ok(customer)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Customers whose name contains `filter`, ignoring case.
    pub fn find_customers(&self, filter: &str) -> Vec<&Customer> {
        let filter = filter.to_lowercase();
        self.customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&filter))
            .collect()
    }

    pub fn update_customer(
        &mut self,
        id: &str,
        name: impl Into<String>,
    ) -> Result<Customer, StoreError> {
        let name = name.into();
        if self.customers.iter().any(|c| c.name == name && c.id != id) {
            return Err(StoreError::already_exists("customer", name));
        }

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("customer", id))?;
        customer.name = name;
        Ok(customer.clone())
    }

    pub fn delete_customer(&mut self, id: &str) -> Result<Customer, StoreError> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("customer", id))?;
        Ok(self.customers.remove(index))
    }
}

/// Pricing rules
impl MemoryStore {
    /// Store a validated rule. A customer may hold one rule per product.
    pub fn create_rule(
        &mut self,
        customer: impl Into<CustomerId>,
        product: impl Into<ProductCode>,
        kind: RuleKind,
    ) -> Result<PricingRule, StoreError> {
        let customer = customer.into();
        let product = product.into();
        kind.validate()?;

        if self
            .rules
            .iter()
            .any(|r| r.customer == customer && r.product == product)
        {
            return Err(StoreError::already_exists(
                "rule",
                format!("{customer}/{product}"),
            ));
        }

        Ok(self.push_rule(customer, product, kind))
    }

    /// Append a validated rule without the one-rule-per-product check.
    ///
    /// Used for bulk imports, where duplicates are left to the checkout's
    /// `DuplicateRules` policy.
    pub fn import_rule(
        &mut self,
        customer: impl Into<CustomerId>,
        product: impl Into<ProductCode>,
        kind: RuleKind,
    ) -> Result<PricingRule, StoreError> {
        kind.validate()?;
        Ok(self.push_rule(customer.into(), product.into(), kind))
    }

    fn push_rule(
        &mut self,
        customer: CustomerId,
        product: ProductCode,
        kind: RuleKind,
    ) -> PricingRule {
        self.next_rule_id += 1;
        let rule = PricingRule {
            id: self.next_rule_id,
            customer,
            product,
            kind,
        };
        debug!(
            id = rule.id,
            customer = %rule.customer,
            product = %rule.product,
            kind = rule.kind.name(),
            "pricing rule created"
        );
        self.rules.push(rule.clone());
        rule
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> Option<&PricingRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Replace a rule's pricing. Uniqueness is only checked on creation.
    pub fn update_rule(&mut self, id: RuleId, kind: RuleKind) -> Result<PricingRule, StoreError> {
        kind.validate()?;
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("rule", id))?;
        rule.kind = kind;
        Ok(rule.clone())
    }

    pub fn delete_rule(&mut self, id: RuleId) -> Result<PricingRule, StoreError> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("rule", id))?;
        Ok(self.rules.remove(index))
    }
}

impl CatalogStore for MemoryStore {
    fn products(&self) -> Vec<Product> {
        let mut products: Vec<_> = self.products.values().cloned().collect();
        products.sort_by(|a, b| a.code.cmp(&b.code));
        products
    }

    fn product(&self, code: &str) -> Option<Product> {
        self.products.get(code).cloned()
    }
}

impl RuleStore for MemoryStore {
    fn rules_for_customer(&self, customer: &str) -> Vec<PricingRule> {
        self.rules
            .iter()
            .filter(|r| r.customer == customer)
            .cloned()
            .collect()
    }
}
