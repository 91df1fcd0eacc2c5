use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::Amount;
use crate::engine::Quote;
use crate::model::{Category, CustomerId, Product, ProductCode, Purchase, Quantity, RuleKind};
use crate::store::{CatalogStore, MemoryStore, StoreError};

/// Errors that can occur when reading csv files
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: {field} must be a non-negative integer, got {value}")]
    InvalidInput {
        line: usize,
        field: &'static str,
        value: i64,
    },

    #[error("line {line}: unrecognized rule kind '{kind}'")]
    UnrecognizedKind { line: usize, kind: String },

    #[error("line {line}: {kind} rule missing {field}")]
    MissingField {
        line: usize,
        kind: &'static str,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    Store { line: usize, source: StoreError },
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    code: ProductCode,
    name: String,
    price: i64,
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    customer: CustomerId,
    product: ProductCode,
    kind: String,
    buy: Option<i64>,
    pay_for: Option<i64>,
    min_quantity: Option<i64>,
    unit_price: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PurchaseRow {
    customer: CustomerId,
    classic: Option<i64>,
    standout: Option<i64>,
    premium: Option<i64>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    customer: &'a str,
    classic: u64,
    standout: u64,
    premium: u64,
    total: u64,
}

/// A record plus the csv line it came from
type Numbered<T> = (usize, T);

fn open_rows<T: for<'de> Deserialize<'de>>(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Numbered<T>, CsvError>> + use<T>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<T>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            result
                .map(|row| (line, row))
                .map_err(|source| CsvError::Parse { line, source })
        }))
}

/// Reject negative values instead of clamping them
fn non_negative<T: TryFrom<i64>>(
    line: usize,
    field: &'static str,
    value: i64,
) -> Result<T, CsvError> {
    T::try_from(value).map_err(|_| CsvError::InvalidInput { line, field, value })
}

fn required(
    line: usize,
    kind: &'static str,
    field: &'static str,
    value: Option<i64>,
) -> Result<i64, CsvError> {
    value.ok_or(CsvError::MissingField { line, kind, field })
}

fn parse_product(line: usize, row: ProductRow) -> Result<Product, CsvError> {
    let price = non_negative(line, "price", row.price)?;
    Ok(Product::new(row.code, row.name, Amount::from_minor(price)))
}

fn parse_rule_kind(line: usize, row: &RuleRow) -> Result<RuleKind, CsvError> {
    match row.kind.as_str() {
        "deal" => {
            let buy = required(line, "deal", "buy", row.buy)?;
            let pay_for = required(line, "deal", "pay_for", row.pay_for)?;
            Ok(RuleKind::Deal {
                buy: non_negative(line, "buy", buy)?,
                pay_for: non_negative(line, "pay_for", pay_for)?,
            })
        }
        "discount" => {
            let min_quantity = required(line, "discount", "min_quantity", row.min_quantity)?;
            let unit_price = required(line, "discount", "unit_price", row.unit_price)?;
            Ok(RuleKind::Discount {
                min_quantity: non_negative(line, "min_quantity", min_quantity)?,
                unit_price: Amount::from_minor(non_negative(line, "unit_price", unit_price)?),
            })
        }
        other => Err(CsvError::UnrecognizedKind {
            line,
            kind: other.to_string(),
        }),
    }
}

fn parse_purchase(line: usize, row: PurchaseRow) -> Result<Purchase, CsvError> {
    let quantity = |category: Category, value: Option<i64>| -> Result<Quantity, CsvError> {
        non_negative(line, category.code(), value.unwrap_or(0))
    };

    Ok(Purchase {
        classic: quantity(Category::Classic, row.classic)?,
        standout: quantity(Category::Standout, row.standout)?,
        premium: quantity(Category::Premium, row.premium)?,
        customer: row.customer,
    })
}

/// Read catalog products from a csv file
pub fn read_products(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Product, CsvError>>, CsvError> {
    let rows = open_rows::<ProductRow>(path.as_ref())?;
    Ok(rows.map(|row| row.and_then(|(line, row)| parse_product(line, row))))
}

/// Read purchases from a csv file. Empty quantities count as zero.
pub fn read_purchases(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Purchase, CsvError>>, CsvError> {
    let rows = open_rows::<PurchaseRow>(path.as_ref())?;
    Ok(rows.map(|row| row.and_then(|(line, row)| parse_purchase(line, row))))
}

/// Load products and, if given, pricing rules into a fresh store.
///
/// Bad rows are logged and skipped; only unreadable files fail. Rules are kept
/// in file order, duplicates included.
pub fn load_store(
    products: impl AsRef<Path>,
    rules: Option<&Path>,
) -> Result<MemoryStore, CsvError> {
    let mut store = MemoryStore::new();

    for (idx, product) in read_products(products)?.enumerate() {
        let line = idx + 2; // 1-indexed, skip header
        let result = product.and_then(|product| {
            store
                .create_product(product)
                .map_err(|source| CsvError::Store { line, source })
        });
        if let Err(e) = result {
            warn!("products: {e}");
        }
    }

    if let Some(path) = rules {
        for row in open_rows::<RuleRow>(path)? {
            let result = row.and_then(|(line, row)| {
                let kind = parse_rule_kind(line, &row)?;
                store
                    .import_rule(row.customer, row.product, kind)
                    .map_err(|source| CsvError::Store { line, source })
            });
            if let Err(e) = result {
                warn!("rules: {e}");
            }
        }
    }

    info!(
        products = store.products().len(),
        rules = store.rules().len(),
        "store loaded"
    );
    Ok(store)
}

/// write quotes in csv format, amounts in minor units
pub fn write_quotes<'a>(
    quotes: impl IntoIterator<Item = &'a Quote>,
    writer: impl io::Write,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for quote in quotes {
        let row = OutputRow {
            customer: &quote.customer,
            classic: quote.charge(Category::Classic).minor(),
            standout: quote.charge(Category::Standout).minor(),
            premium: quote.charge(Category::Premium).minor(),
            total: quote.total.minor(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
