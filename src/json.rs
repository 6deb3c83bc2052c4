//! JSON interop.
//!
//! - [`to_json`] - Value → JSON, used for display and diagnostics
//! - [`from_json`] - JSON → Value of a given type, for building sources
//!   from documents

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::coerce::from_text;
use crate::error::JsonError;
use crate::value::{Map, Opaque, Ptr, Record, Seq, Ty, Value};

/// Serialize a value to JSON.
///
/// Records and maps become objects; map keys that are not text are rendered
/// as their JSON text. Nil pointers, nil maps, opaque values and non-finite
/// floats become `null`. Timestamps use RFC 3339 in UTC.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I8(n) => (*n).into(),
        Value::I16(n) => (*n).into(),
        Value::I32(n) => (*n).into(),
        Value::I64(n) => (*n).into(),
        Value::U8(n) => (*n).into(),
        Value::U16(n) => (*n).into(),
        Value::U32(n) => (*n).into(),
        Value::U64(n) => (*n).into(),
        Value::F32(f) => float(f64::from(*f)),
        Value::F64(f) => float(*f),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Time(t) => JsonValue::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Record(r) => JsonValue::Object(
            r.iter()
                .map(|(name, v)| (name.to_string(), to_json(v)))
                .collect(),
        ),
        Value::Seq(s) => JsonValue::Array(s.items().iter().map(to_json).collect()),
        Value::Map(m) if m.is_nil() => JsonValue::Null,
        Value::Map(m) => JsonValue::Object(
            m.iter()
                .map(|(k, v)| (key_text(k), to_json(v)))
                .collect(),
        ),
        Value::Ptr(p) => p.get().map_or(JsonValue::Null, to_json),
        Value::Opaque(_) => JsonValue::Null,
    }
}

fn float(f: f64) -> JsonValue {
    Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
}

fn key_text(key: &Value) -> String {
    match key.indirect() {
        Some(Value::Str(s)) => s.clone(),
        _ => to_json(key).to_string(),
    }
}

/// Decode JSON into a value of type `ty`.
///
/// Decoding is strict about kinds: a JSON string never becomes a number.
/// Use the copy engine afterwards for coercions.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use value_copy::{RecordType, Ty, Value, json::from_json};
///
/// let user = RecordType::builder("User")
///     .field("Name", Ty::Str)
///     .field("Tags", Ty::seq(Ty::Str))
///     .build();
/// let value = from_json(&json!({"Name": "Ada", "Tags": ["x"]}), &Ty::Record(user))?;
/// assert_eq!(value.as_record().unwrap().get("Name"), Some(&Value::from("Ada")));
/// # Ok::<(), value_copy::JsonError>(())
/// ```
pub fn from_json(json: &JsonValue, ty: &Ty) -> Result<Value, JsonError> {
    let mismatch = || JsonError::Mismatch {
        expected: ty.to_string(),
        found: json_type_name(json),
    };

    let value = match ty {
        Ty::Ptr(elem) => match json {
            JsonValue::Null => Value::Ptr(Ptr::nil((**elem).clone())),
            _ => Value::ptr(from_json(json, elem)?),
        },
        Ty::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
        Ty::I8 | Ty::I16 | Ty::I32 | Ty::I64 => {
            let n = json.as_i64().ok_or_else(|| number_error(json, ty))?;
            int(n, ty).ok_or_else(|| out_of_range(json, ty))?
        }
        Ty::U8 | Ty::U16 | Ty::U32 | Ty::U64 => {
            let n = json.as_u64().ok_or_else(|| number_error(json, ty))?;
            uint(n, ty).ok_or_else(|| out_of_range(json, ty))?
        }
        Ty::F32 => Value::F32(json.as_f64().ok_or_else(mismatch)? as f32),
        Ty::F64 => Value::F64(json.as_f64().ok_or_else(mismatch)?),
        Ty::Str => Value::Str(json.as_str().ok_or_else(mismatch)?.to_string()),
        Ty::Time => {
            let text = json.as_str().ok_or_else(mismatch)?;
            let time = DateTime::parse_from_rfc3339(text)
                .map_err(|_| JsonError::InvalidTime(text.to_string()))?;
            Value::Time(time.with_timezone(&Utc))
        }
        Ty::Record(rt) => {
            let object = json.as_object().ok_or_else(mismatch)?;
            let mut record = Record::new(rt);
            for def in rt.fields() {
                if let Some(field) = object.get(&def.name)
                    && let Some(slot) = record.get_mut(&def.name)
                {
                    *slot = from_json(field, &def.ty)?;
                }
            }
            Value::Record(record)
        }
        Ty::Seq(elem) => {
            let array = json.as_array().ok_or_else(mismatch)?;
            let items = array
                .iter()
                .map(|item| from_json(item, elem))
                .collect::<Result<Vec<_>, _>>()?;
            Value::Seq(Seq::from_items((**elem).clone(), items))
        }
        Ty::Map(key, value) => match json {
            JsonValue::Null => Value::Map(Map::nil((**key).clone(), (**value).clone())),
            JsonValue::Object(object) => {
                Value::Map(decode_map(object, key, value)?)
            }
            _ => return Err(mismatch()),
        },
        Ty::Opaque(name) => match json {
            JsonValue::Null => Value::Opaque(Opaque::new(name.clone(), Vec::new())),
            _ => return Err(JsonError::Unsupported(ty.to_string())),
        },
    };
    Ok(value)
}

fn decode_map(object: &JsonMap<String, JsonValue>, key: &Ty, value: &Ty) -> Result<Map, JsonError> {
    let mut map = Map::new(key.clone(), value.clone());
    for (k, v) in object {
        let key_value = match key.indirect() {
            Ty::Str => Value::Str(k.clone()),
            inner => from_text(k, inner).ok_or_else(|| JsonError::InvalidKey {
                key: k.clone(),
                ty: key.to_string(),
            })?,
        };
        let key_value = match key {
            Ty::Ptr(_) => wrap(key_value, key),
            _ => key_value,
        };
        map.insert(key_value, from_json(v, value)?);
    }
    Ok(map)
}

/// Wrap a concrete value in the pointer layers of `ty`.
fn wrap(value: Value, ty: &Ty) -> Value {
    match ty {
        Ty::Ptr(elem) => Value::ptr(wrap(value, elem)),
        _ => value,
    }
}

fn int(n: i64, ty: &Ty) -> Option<Value> {
    let value = match ty {
        Ty::I8 => Value::I8(n.try_into().ok()?),
        Ty::I16 => Value::I16(n.try_into().ok()?),
        Ty::I32 => Value::I32(n.try_into().ok()?),
        _ => Value::I64(n),
    };
    Some(value)
}

fn uint(n: u64, ty: &Ty) -> Option<Value> {
    let value = match ty {
        Ty::U8 => Value::U8(n.try_into().ok()?),
        Ty::U16 => Value::U16(n.try_into().ok()?),
        Ty::U32 => Value::U32(n.try_into().ok()?),
        _ => Value::U64(n),
    };
    Some(value)
}

/// A number that is not an integer of the right sign is out of range;
/// anything else is a kind mismatch.
fn number_error(json: &JsonValue, ty: &Ty) -> JsonError {
    if json.is_number() {
        out_of_range(json, ty)
    } else {
        JsonError::Mismatch {
            expected: ty.to_string(),
            found: json_type_name(json),
        }
    }
}

fn out_of_range(json: &JsonValue, ty: &Ty) -> JsonError {
    JsonError::OutOfRange {
        value: json.to_string(),
        ty: ty.to_string(),
    }
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
