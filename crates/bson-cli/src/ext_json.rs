//! Extended JSON bridge for `bson inspect --json` and `bson encode`.
//!
//! Plain JSON types map directly. Everything JSON cannot express goes
//! into a single-key `$`-wrapper:
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────────────────────┐
//! │ Value      │ JSON form                                            │
//! ├────────────┼──────────────────────────────────────────────────────┤
//! │ Int32      │ 42                                                   │
//! │ Int64      │ {"$numberLong": "42"}                                │
//! │ Double     │ 1.5, or {"$numberDouble": "NaN"} when not finite     │
//! │ ObjectId   │ {"$oid": "<24 hex>"}                                 │
//! │ DateTime   │ {"$date": {"$numberLong": "<ms>"}}                   │
//! │ Binary     │ {"$binary": {"base64": "..", "subType": "03"}}       │
//! │ Regex      │ {"$regularExpression": {"pattern", "options"}}       │
//! │ JavaScript │ {"$code": ".."}                                      │
//! │ Symbol     │ {"$symbol": ".."}                                    │
//! │ Undefined  │ {"$undefined": true}                                 │
//! │ MinKey     │ {"$minKey": 1}                                       │
//! │ MaxKey     │ {"$maxKey": 1}                                       │
//! └────────────┴──────────────────────────────────────────────────────┘
//! ```
//!
//! Int64 keeps its wrapper so a value written by `encode` comes back with
//! the same width. Objects whose only key is an unknown `$` name are
//! read as ordinary documents.

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bson_types::{Binary, BinarySubtype, Document, ObjectId, Regex, UtcDateTime, Value};
use serde_json::{Map, Number, Value as Json, json};

/// Render a document as an extended JSON object.
#[must_use]
pub fn document_to_json(doc: &Document) -> Json {
    Json::Object(
        doc.iter()
            .map(|(key, value)| (key.to_string(), value_to_json(value)))
            .collect(),
    )
}

#[must_use]
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Double(v) => match Number::from_f64(*v) {
            Some(n) => Json::Number(n),
            None => json!({ "$numberDouble": non_finite_name(*v) }),
        },
        Value::String(s) => Json::String(s.clone()),
        Value::Document(doc) => document_to_json(doc),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Binary(bin) => json!({
            "$binary": {
                "base64": STANDARD.encode(&bin.bytes),
                "subType": format!("{:02x}", bin.subtype.wire_id()),
            }
        }),
        Value::Undefined => json!({ "$undefined": true }),
        Value::ObjectId(id) => json!({ "$oid": id.to_hex() }),
        Value::Boolean(b) => Json::Bool(*b),
        Value::DateTime(dt) => json!({ "$date": { "$numberLong": dt.millis().to_string() } }),
        Value::Null => Json::Null,
        Value::Regex(re) => json!({
            "$regularExpression": { "pattern": re.pattern, "options": re.options }
        }),
        Value::JavaScript(code) => json!({ "$code": code }),
        Value::Symbol(sym) => json!({ "$symbol": sym }),
        Value::Int32(v) => Json::from(*v),
        Value::Int64(v) => json!({ "$numberLong": v.to_string() }),
        Value::MinKey => json!({ "$minKey": 1 }),
        Value::MaxKey => json!({ "$maxKey": 1 }),
    }
}

fn non_finite_name(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}

/// Read a JSON object as a document.
///
/// # Errors
///
/// Fails if `json` is not an object or any nested wrapper is malformed.
pub fn json_to_document(json: &Json) -> Result<Document> {
    match json {
        Json::Object(map) => object_to_document(map),
        other => bail!("expected a JSON object, found {}", kind_name(other)),
    }
}

/// Read any JSON value.
///
/// Integers that fit 32 bits become `Int32`, other integers `Int64`,
/// everything else numeric `Double`.
///
/// # Errors
///
/// Fails on a malformed `$` wrapper.
pub fn json_to_value(json: &Json) -> Result<Value> {
    let value = match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::Number(n) => number_to_value(n),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::Array(
            items
                .iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(map) => match wrapper(map) {
            Some((name, inner)) => {
                match read_wrapper(name, inner).with_context(|| format!("invalid {name}"))? {
                    Some(value) => value,
                    None => Value::Document(object_to_document(map)?),
                }
            }
            None => Value::Document(object_to_document(map)?),
        },
    };
    Ok(value)
}

fn object_to_document(map: &Map<String, Json>) -> Result<Document> {
    let mut doc = Document::with_capacity(map.len());
    for (key, value) in map {
        let value = json_to_value(value).with_context(|| format!("at key {key:?}"))?;
        doc.push(key.as_str(), value);
    }
    Ok(doc)
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => Value::Int32(small),
            Err(_) => Value::Int64(i),
        };
    }
    // u64 above i64::MAX, or a real fraction.
    Value::Double(n.as_f64().unwrap_or(f64::NAN))
}

/// A single-key object whose key starts with `$`.
fn wrapper(map: &Map<String, Json>) -> Option<(&str, &Json)> {
    if map.len() != 1 {
        return None;
    }
    let (name, inner) = map.iter().next()?;
    name.starts_with('$').then_some((name.as_str(), inner))
}

/// Decode a known wrapper, or `None` if `name` is not one.
fn read_wrapper(name: &str, inner: &Json) -> Result<Option<Value>> {
    let value = match name {
        "$oid" => Value::ObjectId(ObjectId::parse_str(expect_str(inner)?)?),
        "$numberLong" => Value::Int64(expect_str(inner)?.parse()?),
        "$numberInt" => Value::Int32(expect_str(inner)?.parse()?),
        "$numberDouble" => Value::Double(parse_double(expect_str(inner)?)?),
        "$date" => Value::DateTime(UtcDateTime::from_millis(read_date(inner)?)),
        "$binary" => Value::Binary(read_binary(inner)?),
        "$regularExpression" => {
            let fields = expect_object(inner)?;
            Value::Regex(Regex::new(
                expect_str(field(fields, "pattern")?)?,
                expect_str(field(fields, "options")?)?,
            ))
        }
        "$code" => Value::JavaScript(expect_str(inner)?.to_string()),
        "$symbol" => Value::Symbol(expect_str(inner)?.to_string()),
        "$undefined" => Value::Undefined,
        "$minKey" => Value::MinKey,
        "$maxKey" => Value::MaxKey,
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn read_date(inner: &Json) -> Result<i64> {
    match inner {
        Json::Number(n) => n
            .as_i64()
            .ok_or_else(|| anyhow!("milliseconds must be an integer")),
        Json::Object(fields) => Ok(expect_str(field(fields, "$numberLong")?)?.parse()?),
        other => bail!("expected milliseconds, found {}", kind_name(other)),
    }
}

fn read_binary(inner: &Json) -> Result<Binary> {
    let fields = expect_object(inner)?;
    let bytes = STANDARD
        .decode(expect_str(field(fields, "base64")?)?)
        .context("bad base64 payload")?;
    let subtype = u8::from_str_radix(expect_str(field(fields, "subType")?)?, 16)
        .context("subType must be hex")?;
    Ok(Binary::new(BinarySubtype::from_wire(subtype)?, bytes))
}

fn parse_double(text: &str) -> Result<f64> {
    Ok(match text {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        other => other.parse()?,
    })
}

fn field<'a>(fields: &'a Map<String, Json>, name: &str) -> Result<&'a Json> {
    fields
        .get(name)
        .ok_or_else(|| anyhow!("missing field {name:?}"))
}

fn expect_str(json: &Json) -> Result<&str> {
    json.as_str()
        .ok_or_else(|| anyhow!("expected a string, found {}", kind_name(json)))
}

fn expect_object(json: &Json) -> Result<&Map<String, Json>> {
    json.as_object()
        .ok_or_else(|| anyhow!("expected an object, found {}", kind_name(json)))
}

fn kind_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_maps_directly() {
        let json = json!({ "a": 1, "b": [true, null], "c": "x", "d": 2.5 });
        let doc = json_to_document(&json).unwrap();
        let expected = Document::new()
            .with("a", 1)
            .with("b", vec![Value::Boolean(true), Value::Null])
            .with("c", "x")
            .with("d", 2.5);
        assert_eq!(doc, expected);
    }

    #[test]
    fn key_order_is_preserved() {
        let json: Json = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let doc = json_to_document(&json).unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
        assert_eq!(
            serde_json::to_string(&document_to_json(&doc)).unwrap(),
            r#"{"z":1,"a":2,"m":3}"#
        );
    }

    #[test]
    fn integer_widths() {
        assert_eq!(json_to_value(&json!(7)).unwrap(), Value::Int32(7));
        assert_eq!(
            json_to_value(&json!(1_i64 << 40)).unwrap(),
            Value::Int64(1 << 40)
        );
        assert_eq!(
            json_to_value(&json!({ "$numberLong": "5" })).unwrap(),
            Value::Int64(5)
        );
    }

    #[test]
    fn wrappers_round_trip() {
        let doc = Document::new()
            .with("_id", ObjectId::from_bytes([0xAB; 12]))
            .with("when", UtcDateTime::from_millis(1_700_000_000_000))
            .with("blob", Binary::new(BinarySubtype::Uuid, vec![1, 2, 3, 4]))
            .with("re", Regex::new("^a", "i"))
            .with("js", Value::JavaScript("f()".into()))
            .with("sym", Value::Symbol("s".into()))
            .with("undef", Value::Undefined)
            .with("lo", Value::MinKey)
            .with("hi", Value::MaxKey)
            .with("long", i64::MIN)
            .with("inf", f64::INFINITY);

        let json = document_to_json(&doc);
        assert_eq!(json["_id"], json!({ "$oid": "abababababababababababab" }));
        assert_eq!(
            json["blob"],
            json!({ "$binary": { "base64": "AQIDBA==", "subType": "03" } })
        );
        assert_eq!(json_to_document(&json).unwrap(), doc);
    }

    #[test]
    fn date_accepts_bare_millis() {
        let value = json_to_value(&json!({ "$date": -5 })).unwrap();
        assert_eq!(value, Value::DateTime(UtcDateTime::from_millis(-5)));
    }

    #[test]
    fn unknown_dollar_key_is_a_document() {
        let value = json_to_value(&json!({ "$set": { "a": 1 } })).unwrap();
        assert_eq!(
            value,
            Value::Document(Document::new().with("$set", Document::new().with("a", 1)))
        );
    }

    #[test]
    fn malformed_wrappers_rejected() {
        assert!(json_to_value(&json!({ "$oid": "xyz" })).is_err());
        assert!(json_to_value(&json!({ "$numberLong": 5 })).is_err());
        assert!(
            json_to_value(&json!({ "$binary": { "base64": "AA==", "subType": "07" } })).is_err()
        );
        assert!(json_to_document(&json!([1, 2])).is_err());
    }
}
