/// JSONとDynamoDB AttributeValueの相互変換
///
/// 数値は元のテキストのまま`N`型へ渡し、`N`型も文字列のままJSON数値に戻す。
/// DynamoDBの38桁精度を`f64`で丸めないための変換層。
use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{Map, Number, Value};

use super::item_table::TableError;
use crate::domain::Item;

/// アイテムをDynamoDBの属性マップに変換
pub fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.as_map()
        .iter()
        .map(|(key, value)| (key.clone(), to_attribute(value)))
        .collect()
}

/// DynamoDBの属性マップをアイテムに変換
pub fn attributes_to_item(
    attributes: HashMap<String, AttributeValue>,
) -> Result<Item, TableError> {
    let map = attributes
        .into_iter()
        .map(|(key, attribute)| Ok((key, from_attribute(attribute)?)))
        .collect::<Result<Map<String, Value>, TableError>>()?;

    Ok(Item::from(map))
}

/// JSON値を属性値に変換
///
/// | JSON | DynamoDB |
/// |------|----------|
/// | null | NULL |
/// | bool | BOOL |
/// | number | N（テキストそのまま） |
/// | string | S |
/// | array | L |
/// | object | M |
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), to_attribute(value)))
                .collect(),
        ),
    }
}

/// 属性値をJSON値に変換
///
/// セット型（SS/NS/BS）は配列に、バイナリ（B/BS）はBase64文字列になる。
pub fn from_attribute(attribute: AttributeValue) -> Result<Value, TableError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(flag) => Value::Bool(flag),
        AttributeValue::N(text) => Value::Number(parse_number(&text)?),
        AttributeValue::S(text) => Value::String(text),
        AttributeValue::L(attributes) => Value::Array(
            attributes
                .into_iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(attributes) => Value::Object(
            attributes
                .into_iter()
                .map(|(key, attribute)| Ok((key, from_attribute(attribute)?)))
                .collect::<Result<Map<String, Value>, TableError>>()?,
        ),
        AttributeValue::Ss(texts) => Value::Array(texts.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(texts) => Value::Array(
            texts
                .iter()
                .map(|text| parse_number(text).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::B(blob) => encode_blob(&blob),
        AttributeValue::Bs(blobs) => Value::Array(blobs.iter().map(encode_blob).collect()),
        other => {
            return Err(TableError::SerializationError(format!(
                "Unsupported attribute type: {:?}",
                other
            )));
        }
    };

    Ok(value)
}

fn parse_number(text: &str) -> Result<Number, TableError> {
    serde_json::from_str::<Number>(text)
        .map_err(|e| TableError::SerializationError(format!("Invalid number '{}': {}", text, e)))
}

fn encode_blob(blob: &Blob) -> Value {
    Value::String(general_purpose::STANDARD.encode(blob.as_ref()))
}
