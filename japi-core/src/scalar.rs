// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The leaf-value codec: converts between erased Rust scalars and JSON
//! values.
//!
//! The document writer and reader treat this as a black box with two
//! operations. [`DefaultScalarCodec`] covers the whole [`ScalarKind`] table,
//! including the chrono date and time types; coercion between compatible
//! numerics (JSON integers into narrower integer kinds, integral floats into
//! integer kinds) is its responsibility. Custom implementations plug into the
//! facade via [`Japi::scalar_codec`](crate::japi::Japi::scalar_codec).

use std::any::Any;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

use crate::error::Error;
use crate::types::ScalarKind;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Converts leaf values between their in-memory form and the JSON AST.
pub trait ScalarCodec {
    /// Serializes an erased scalar into a JSON value.
    fn serialize_value(&self, value: &dyn Any) -> Result<Value, Error>;

    /// Deserializes a JSON value into an erased scalar of the given kind.
    fn deserialize_value(&self, kind: ScalarKind, value: &Value) -> Result<Box<dyn Any>, Error>;
}

/// The built-in scalar codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultScalarCodec;

impl ScalarCodec for DefaultScalarCodec {
    fn serialize_value(&self, value: &dyn Any) -> Result<Value, Error> {
        if let Some(v) = value.downcast_ref::<bool>() {
            return Ok(Value::Bool(*v));
        }
        if let Some(v) = value.downcast_ref::<i8>() {
            return Ok(Value::from(*v));
        }
        if let Some(v) = value.downcast_ref::<i16>() {
            return Ok(Value::from(*v));
        }
        if let Some(v) = value.downcast_ref::<i32>() {
            return Ok(Value::from(*v));
        }
        if let Some(v) = value.downcast_ref::<i64>() {
            return Ok(Value::from(*v));
        }
        if let Some(v) = value.downcast_ref::<f32>() {
            return finite_number(f64::from(*v));
        }
        if let Some(v) = value.downcast_ref::<f64>() {
            return finite_number(*v);
        }
        if let Some(v) = value.downcast_ref::<String>() {
            return Ok(Value::String(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<NaiveDate>() {
            return Ok(Value::String(v.format(DATE_FORMAT).to_string()));
        }
        if let Some(v) = value.downcast_ref::<NaiveDateTime>() {
            return Ok(Value::String(v.format(DATE_TIME_FORMAT).to_string()));
        }
        if let Some(v) = value.downcast_ref::<DateTime<Utc>>() {
            return Ok(Value::String(v.to_rfc3339()));
        }
        Err(Error::type_error(
            "scalar codec cannot serialize a value of this type",
        ))
    }

    fn deserialize_value(&self, kind: ScalarKind, value: &Value) -> Result<Box<dyn Any>, Error> {
        match kind {
            ScalarKind::Bool => {
                let v = value
                    .as_bool()
                    .ok_or_else(|| Error::invalid_data("expected a JSON boolean"))?;
                Ok(Box::new(v))
            }
            ScalarKind::Int8 => narrow::<i8>(integral(value)?),
            ScalarKind::Int16 => narrow::<i16>(integral(value)?),
            ScalarKind::Int32 => narrow::<i32>(integral(value)?),
            ScalarKind::Int64 => Ok(Box::new(integral(value)?)),
            ScalarKind::Float32 => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| Error::invalid_data("expected a JSON number"))?;
                Ok(Box::new(v as f32))
            }
            ScalarKind::Float64 => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| Error::invalid_data("expected a JSON number"))?;
                Ok(Box::new(v))
            }
            ScalarKind::String => {
                let v = value
                    .as_str()
                    .ok_or_else(|| Error::invalid_data("expected a JSON string"))?;
                Ok(Box::new(v.to_owned()))
            }
            ScalarKind::LocalDate => {
                let s = text(value)?;
                let v = NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|e| Error::invalid_data(format!("invalid date `{s}`: {e}")))?;
                Ok(Box::new(v))
            }
            ScalarKind::LocalDateTime => {
                let s = text(value)?;
                let v = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
                    .map_err(|e| Error::invalid_data(format!("invalid datetime `{s}`: {e}")))?;
                Ok(Box::new(v))
            }
            ScalarKind::Timestamp => {
                let s = text(value)?;
                let v = DateTime::parse_from_rfc3339(s)
                    .map_err(|e| Error::invalid_data(format!("invalid timestamp `{s}`: {e}")))?;
                Ok(Box::new(v.with_timezone(&Utc)))
            }
        }
    }
}

fn finite_number(v: f64) -> Result<Value, Error> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| Error::invalid_data("non-finite floats have no JSON form"))
}

fn text(value: &Value) -> Result<&str, Error> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid_data("expected a JSON string"))
}

fn integral(value: &Value) -> Result<i64, Error> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if let Some(f) = value.as_f64() {
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            return Ok(f as i64);
        }
    }
    // Resource ids are canonically strings on the wire; numeric strings
    // coerce into integer kinds.
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(n);
        }
    }
    Err(Error::invalid_data("expected a JSON integer"))
}

fn narrow<T>(n: i64) -> Result<Box<dyn Any>, Error>
where
    T: TryFrom<i64> + 'static,
{
    T::try_from(n)
        .map(|v| Box::new(v) as Box<dyn Any>)
        .map_err(|_| Error::invalid_data(format!("integer {n} out of range")))
}
