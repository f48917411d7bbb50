//! Product dataset: CSV file interface and synthetic sample generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Number of rows in the generated sample dataset.
pub const SAMPLE_SIZE: usize = 10;

/// A row of the products table.
///
/// Serialized field order matches the CSV column order:
/// `id, prod_id, name, code, price, preview_text, detail_text, user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// External product id, absent for rows that never had one.
    pub prod_id: Option<i64>,
    pub name: String,
    /// Symbolic product code.
    pub code: String,
    pub price: i64,
    /// Short description.
    pub preview_text: String,
    /// Full description.
    pub detail_text: String,
    /// Owning user, foreign key into the users table.
    pub user_id: i64,
}

/// DatasetError represents errors while reading or writing product data.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generates the synthetic sample dataset.
///
/// Row `i` gets index `i`, except every fifth row which gets a random index
/// within the range seen so far. The resulting duplicate user references
/// exercise the foreign-key path in the seeder; row ids stay unique.
pub fn generate_products() -> Vec<Product> {
    let mut rng = rand::thread_rng();

    (0..SAMPLE_SIZE)
        .map(|i| {
            let index = if i % 5 == 0 { rng.gen_range(0..=i) } else { i };
            let index = index as i64;
            Product {
                id: i as i64,
                prod_id: Some(index),
                name: format!("name_{index}"),
                code: format!("code_{i}"),
                price: 100 * (i as i64 + 1),
                preview_text: format!("preview_text_{i}"),
                detail_text: format!("detail_text_{i}"),
                user_id: index,
            }
        })
        .collect()
}

/// Loads products from a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Vec<Product>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut products = Vec::new();
    for row in reader.deserialize() {
        products.push(row?);
    }
    Ok(products)
}

/// Writes products to a CSV file, header row included.
pub fn write_csv(path: &Path, products: &[Product]) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;
    Ok(())
}

/// Distinct user ids referenced by the products, in first-seen order.
pub fn unique_user_ids(products: &[Product]) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for product in products {
        if seen.insert(product.user_id) {
            ids.push(product.user_id);
        }
    }
    ids
}

#[cfg(test)]
mod tests;
