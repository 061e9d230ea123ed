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

//! URI template binding for relationship `related` links.

use serde_json::Value;

use crate::contract::{Contract, FieldValue};
use crate::entity::EntityRef;
use crate::error::Error;
use crate::scalar::ScalarCodec;

/// Binds a URI template to an entity, yielding the `links.related` string of
/// a relationship object.
pub trait UriBinder {
    fn bind(
        &self,
        template: &str,
        entity: &EntityRef,
        contract: &Contract,
        scalars: &dyn ScalarCodec,
    ) -> Result<String, Error>;
}

/// The built-in binder: substitutes `{fieldName}` placeholders with the
/// serialized value of the named contract field.
///
/// Placeholder names match the contract's camelCase field names
/// case-insensitively. A null field value binds as the empty string; a
/// placeholder naming no field is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateBinder;

impl UriBinder for TemplateBinder {
    fn bind(
        &self,
        template: &str,
        entity: &EntityRef,
        contract: &Contract,
        scalars: &dyn ScalarCodec,
    ) -> Result<String, Error> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 1..];
            let close = tail
                .find('}')
                .ok_or_else(|| Error::invalid_argument("unterminated placeholder in uri template"))?;
            let name = &tail[..close];
            let field = contract.find_field(name).ok_or_else(|| {
                Error::invalid_argument(format!("uri template references unknown field `{name}`"))
            })?;
            match field.get(entity)? {
                FieldValue::Scalar(raw) => {
                    out.push_str(&uri_text(&scalars.serialize_value(raw.as_ref())?));
                }
                FieldValue::Null => {}
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "uri template field `{name}` is not a scalar"
                    )))
                }
            }
            rest = &tail[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn uri_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
