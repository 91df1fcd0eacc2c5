use ads_checkout::{
    Amount, Checkout, MemoryStore, PricingConfig, Product, Purchase, RuleKind, calculate,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Generates purchases cycling over `num_customers` customers.
///
/// Quantities grow with the purchase index so discount thresholds and deal
/// bundles are crossed regularly.
pub struct PurchaseGenerator {
    num_customers: u32,
    remaining: u32,
    index: u32,
}

impl PurchaseGenerator {
    pub fn new(num_customers: u32, count: u32) -> Self {
        Self {
            num_customers,
            remaining: count,
            index: 0,
        }
    }
}

impl Iterator for PurchaseGenerator {
    type Item = Purchase;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.index += 1;

        let customer = self.index % self.num_customers;
        Some(Purchase::new(
            customer.to_string(),
            self.index % 7,
            self.index % 11,
            self.index % 3,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PurchaseGenerator {}

/// Store with the three ad products and one rule per product for every customer
fn store(num_customers: u32) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (code, price) in [("classic", 34999), ("standout", 59999), ("premium", 99999)] {
        store
            .create_product(Product::new(code, code, Amount::from_minor(price)))
            .unwrap();
    }

    for customer in 0..num_customers {
        let id = customer.to_string();
        store
            .create_rule(&*id, "classic", RuleKind::Deal { buy: 3, pay_for: 2 })
            .unwrap();
        store
            .create_rule(
                &*id,
                "standout",
                RuleKind::Discount {
                    min_quantity: 4,
                    unit_price: Amount::from_minor(49999),
                },
            )
            .unwrap();
    }
    store
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    let base = Amount::from_minor(59999);
    let rules = [
        ("standard", None),
        ("deal", Some(RuleKind::Deal { buy: 5, pay_for: 3 })),
        (
            "discount",
            Some(RuleKind::Discount {
                min_quantity: 3,
                unit_price: Amount::from_minor(23990),
            }),
        ),
    ];

    for (label, rule) in rules {
        group.bench_with_input(BenchmarkId::from_parameter(label), &rule, |b, rule| {
            b.iter(|| {
                for quantity in 1..=1_000 {
                    let _ = black_box(calculate(rule.as_ref(), quantity, base));
                }
            });
        });
    }

    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");

    for (customers, purchases) in [(10, 10_000u32), (1_000, 10_000)] {
        let checkout = Checkout::new(store(customers), PricingConfig::default());
        let label = format!("{customers}c_{purchases}p");
        group.bench_with_input(
            BenchmarkId::from_parameter(&label),
            &purchases,
            |b, &purchases| {
                b.iter(|| {
                    for purchase in PurchaseGenerator::new(customers, purchases) {
                        let _ = black_box(checkout.quote(&purchase));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_calculate, bench_quote);
criterion_main!(benches);
