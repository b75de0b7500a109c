use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::str::FromStr;
use stockroom_core::{Category, DataValidationError, Product};

fn payload() -> Map<String, Value> {
    json!({
        "name": "hammer",
        "description": "claw hammer with fiberglass handle",
        "price": "12.50",
        "available": true,
        "category": "TOOLS",
    })
    .as_object()
    .cloned()
    .unwrap()
}

#[test]
fn deserialize_builds_fully_populated_record() {
    let product = Product::deserialize(&payload()).unwrap();

    assert_eq!(product.id, None);
    assert_eq!(product.name, "hammer");
    assert_eq!(product.description, "claw hammer with fiberglass handle");
    assert_eq!(product.price, Decimal::from_str("12.50").unwrap());
    assert!(product.available);
    assert_eq!(product.category, Some(Category::Tools));
}

#[test]
fn serialize_then_deserialize_round_trips() {
    let original = Product::new(
        "tee",
        "plain cotton tee",
        Decimal::from_str("19.90").unwrap(),
        false,
        Category::Cloths,
    );

    let decoded = Product::deserialize(&original.serialize()).unwrap();

    assert_eq!(decoded.name, original.name);
    assert_eq!(decoded.description, original.description);
    assert_eq!(decoded.price, original.price);
    assert_eq!(decoded.available, original.available);
    assert_eq!(decoded.category, original.category);
}

#[test]
fn serialize_keeps_price_scale_and_category_name() {
    let mut product = Product::new(
        "tee",
        "plain cotton tee",
        Decimal::from_str("12.50").unwrap(),
        true,
        Category::Cloths,
    );
    product.id = Some(7);

    let data = product.serialize();
    assert_eq!(data["id"], json!(7));
    assert_eq!(data["price"], json!("12.50"));
    assert_eq!(data["available"], json!(true));
    assert_eq!(data["category"], json!("CLOTHS"));
}

#[test]
fn serialize_substitutes_unknown_for_unset_category() {
    let mut product = Product::new(
        "widget",
        "desc",
        Decimal::from_str("9.99").unwrap(),
        true,
        Category::Food,
    );
    product.category = None;

    let data = product.serialize();
    assert_eq!(data["category"], json!("UNKNOWN"));
}

#[test]
fn serialize_emits_null_id_for_unpersisted_record() {
    let product = Product::new(
        "widget",
        "desc",
        Decimal::from_str("9.99").unwrap(),
        true,
        Category::Food,
    );
    assert_eq!(product.serialize()["id"], Value::Null);
}

#[test]
fn deserialize_accepts_numeric_price_without_float_drift() {
    let mut data = payload();
    data.insert("price".to_string(), json!(12.5));

    let product = Product::deserialize(&data).unwrap();
    assert_eq!(product.price, Decimal::from_str("12.5").unwrap());
    assert_eq!(product.price.to_string(), "12.5");
}

#[test]
fn deserialize_accepts_integer_price() {
    let mut data = payload();
    data.insert("price".to_string(), json!(12));

    let product = Product::deserialize(&data).unwrap();
    assert_eq!(product.price, Decimal::from_str("12").unwrap());
}

#[test]
fn deserialize_trims_whitespace_padded_price_string() {
    let mut data = payload();
    data.insert("price".to_string(), json!("  12.50  "));

    let product = Product::deserialize(&data).unwrap();
    assert_eq!(product.price.to_string(), "12.50");
}

#[test]
fn deserialize_missing_name_fails_with_missing_field() {
    let mut data = payload();
    data.remove("name");

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::MissingField("name"));
}

#[test]
fn deserialize_missing_description_fails_with_missing_field() {
    let mut data = payload();
    data.remove("description");

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::MissingField("description"));
}

#[test]
fn deserialize_unparseable_price_fails_with_invalid_price() {
    let mut data = payload();
    data.insert("price".to_string(), json!("twelve.fifty"));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(
        err,
        DataValidationError::InvalidPrice("twelve.fifty".to_string())
    );
}

#[test]
fn deserialize_non_numeric_non_string_price_fails_with_invalid_type() {
    let mut data = payload();
    data.insert("price".to_string(), json!([12, 50]));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::InvalidType("price"));
}

#[test]
fn deserialize_rejects_truthy_string_for_available() {
    let mut data = payload();
    data.insert("available".to_string(), json!("yes"));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::InvalidType("available"));
}

#[test]
fn deserialize_rejects_numeric_available() {
    let mut data = payload();
    data.insert("available".to_string(), json!(1));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::InvalidType("available"));
}

#[test]
fn deserialize_unknown_category_fails_with_invalid_attribute() {
    let mut data = payload();
    data.insert("category".to_string(), json!("NOT_A_REAL_CATEGORY"));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(
        err,
        DataValidationError::InvalidAttribute("NOT_A_REAL_CATEGORY".to_string())
    );
}

#[test]
fn deserialize_category_lookup_is_case_sensitive() {
    let mut data = payload();
    data.insert("category".to_string(), json!("tools"));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::InvalidAttribute("tools".to_string()));
}

#[test]
fn deserialize_surfaces_first_failing_field_only() {
    // Both name and price are bad; field order says name wins.
    let mut data = payload();
    data.remove("name");
    data.insert("price".to_string(), json!("twelve.fifty"));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::MissingField("name"));
}

#[test]
fn deserialize_rejects_non_string_name() {
    let mut data = payload();
    data.insert("name".to_string(), json!(42));

    let err = Product::deserialize(&data).unwrap_err();
    assert_eq!(err, DataValidationError::InvalidType("name"));
}
