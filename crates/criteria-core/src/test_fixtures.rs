use crate::{
    model::{EntityModel, FieldKind, FieldModel},
    value::Value,
};
use std::collections::BTreeMap;

pub(crate) static PRODUCT: EntityModel = EntityModel::new(
    "test::Product",
    &[
        FieldModel::new("id", FieldKind::Uint),
        FieldModel::new("price", FieldKind::Float64),
        FieldModel::nullable("name", FieldKind::Text),
        FieldModel::new("qty", FieldKind::Int),
        FieldModel::new("active", FieldKind::Bool),
        FieldModel::new("tags", FieldKind::List(&FieldKind::Text)),
        FieldModel::nullable("released", FieldKind::Date),
    ],
);

pub(crate) static ORDER_LINE: EntityModel = EntityModel::new(
    "test::OrderLine",
    &[
        FieldModel::new("product_id", FieldKind::Uint),
        FieldModel::new("quantity", FieldKind::Int),
    ],
);

/// One product record as a map-backed row.
pub(crate) fn product_row(price: f64, name: Option<&str>) -> BTreeMap<String, Value> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), Value::Uint(1));
    row.insert("price".to_string(), Value::float64(price).expect("finite"));
    row.insert("name".to_string(), Value::from(name));
    row.insert("qty".to_string(), Value::Int(3));
    row.insert("active".to_string(), Value::Bool(true));
    row.insert("tags".to_string(), Value::from_slice(&["a", "b"]));
    row.insert("released".to_string(), Value::Null);
    row
}
