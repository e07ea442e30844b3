/*
 * Copyright 2021 Google LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Conversions between JSON and the `google.protobuf.Struct` family used
//! for untyped Envoy filter configuration.

use prost_types::value::Kind;
use serde_json::Value;

/// Converts a JSON object into a `Struct`. Anything other than an object
/// becomes an empty `Struct`.
pub fn struct_from_json(value: Value) -> prost_types::Struct {
    match value {
        Value::Object(mapping) => prost_types::Struct {
            fields: mapping
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        },
        _ => prost_types::Struct::default(),
    }
}

pub fn from_json(value: Value) -> prost_types::Value {
    prost_types::Value {
        kind: Some(match value {
            Value::Null => Kind::NullValue(<_>::default()),
            Value::Bool(v) => Kind::BoolValue(v),
            Value::Number(v) => Kind::NumberValue(v.as_f64().unwrap_or_default()),
            Value::String(v) => Kind::StringValue(v),
            Value::Array(v) => Kind::ListValue(prost_types::ListValue {
                values: v.into_iter().map(from_json).collect(),
            }),
            Value::Object(v) => Kind::StructValue(prost_types::Struct {
                fields: v
                    .into_iter()
                    .map(|(key, value)| (key, from_json(value)))
                    .collect(),
            }),
        }),
    }
}

pub fn struct_to_json(value: prost_types::Struct) -> Value {
    Value::Object(
        value
            .fields
            .into_iter()
            .filter_map(|(k, v)| v.kind.map(value_from_kind).map(|v| (k, v)))
            .collect(),
    )
}

pub fn value_from_kind(kind: Kind) -> Value {
    match kind {
        Kind::NullValue(_) => Value::Null,
        Kind::BoolValue(v) => Value::Bool(v),
        // Integral numbers round trip as integers, everything else as floats.
        Kind::NumberValue(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            Value::Number(serde_json::Number::from(v as i64))
        }
        Kind::NumberValue(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Kind::StringValue(v) => Value::String(v),
        Kind::ListValue(v) => Value::Array(
            v.values
                .into_iter()
                .filter_map(|v| v.kind)
                .map(value_from_kind)
                .collect(),
        ),
        Kind::StructValue(v) => struct_to_json(v),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn nested() {
        let value = json!({
            "name": "envoy.router",
            "enabled": true,
            "weight": 3,
            "ratio": 0.5,
            "tags": ["a", null],
            "inner": { "path": "/dev/stdout" },
        });

        let converted = struct_from_json(value.clone());
        assert_eq!(
            Some(&prost_types::Value {
                kind: Some(Kind::StringValue("envoy.router".into()))
            }),
            converted.fields.get("name")
        );
        assert_eq!(value, struct_to_json(converted));
    }

    #[test]
    fn non_object_is_empty() {
        assert_eq!(prost_types::Struct::default(), struct_from_json(json!("hi")));
    }
}
