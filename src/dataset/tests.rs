//! Tests for dataset module.

use super::*;
use std::fs;

fn product(id: i64, user_id: i64) -> Product {
    Product {
        id,
        prod_id: Some(id),
        name: format!("name_{id}"),
        code: format!("code_{id}"),
        price: 100,
        preview_text: format!("preview_text_{id}"),
        detail_text: format!("detail_text_{id}"),
        user_id,
    }
}

// ==================== Generation ====================

#[test]
fn test_generate_has_sample_size_rows() {
    let products = generate_products();
    assert_eq!(products.len(), SAMPLE_SIZE);
}

#[test]
fn test_generate_row_ids_are_unique_and_sequential() {
    let products = generate_products();
    for (i, product) in products.iter().enumerate() {
        assert_eq!(product.id, i as i64);
    }
}

#[test]
fn test_generate_mandatory_fields_are_non_empty() {
    for product in generate_products() {
        assert!(!product.name.is_empty());
        assert!(!product.code.is_empty());
        assert!(!product.preview_text.is_empty());
        assert!(!product.detail_text.is_empty());
        assert!(product.price > 0);
    }
}

#[test]
fn test_generate_every_fifth_row_stays_in_range() {
    // Randomized rows draw from 0..=i; all others use the row counter.
    for _ in 0..20 {
        for (i, product) in generate_products().iter().enumerate() {
            let i = i as i64;
            if i % 5 == 0 {
                assert!(product.user_id >= 0 && product.user_id <= i);
            } else {
                assert_eq!(product.user_id, i);
            }
        }
    }
}

// ==================== Unique users ====================

#[test]
fn test_unique_user_ids_first_seen_order() {
    let products = vec![product(1, 2), product(2, 1), product(3, 2)];
    assert_eq!(unique_user_ids(&products), vec![2, 1]);
}

#[test]
fn test_three_products_two_users() {
    let products = vec![product(1, 1), product(2, 2), product(3, 1)];
    assert_eq!(unique_user_ids(&products), vec![1, 2]);
}

#[test]
fn test_unique_user_ids_empty() {
    assert!(unique_user_ids(&[]).is_empty());
}

// ==================== CSV ====================

#[test]
fn test_load_csv_parses_expected_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.csv");
    fs::write(
        &path,
        "id,prod_id,name,code,price,preview_text,detail_text,user_id\n\
         1,,widget,W-1,100,short,long,1\n\
         2,7,gadget,G-2,250,brief,full,2\n\
         3,8,gizmo,Z-3,75,quick,verbose,1\n",
    )
    .unwrap();

    let products = load_csv(&path).unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].prod_id, None);
    assert_eq!(products[0].name, "widget");
    assert_eq!(products[1].prod_id, Some(7));
    assert_eq!(products[1].price, 250);
    assert_eq!(products[2].detail_text, "verbose");

    // CSV referencing users {1, 2} yields exactly those users.
    assert_eq!(unique_user_ids(&products), vec![1, 2]);
}

#[test]
fn test_write_csv_emits_expected_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.csv");

    write_csv(&path, &[product(1, 1)]).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(
        header,
        "id,prod_id,name,code,price,preview_text,detail_text,user_id"
    );
}

#[test]
fn test_load_csv_missing_file() {
    let result = load_csv(Path::new("nonexistent_database.csv"));
    assert!(result.is_err());
}
