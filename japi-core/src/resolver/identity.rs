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

//! Resource identity: the `(type, id)` pair that makes resources comparable
//! across a document.
//!
//! The visited set of the writer and the materialization cache of the reader
//! are both keyed by [`ResourceKey`]. Hashing the pair, not the whole JSON
//! object, is what keeps deduplication stable when two renditions of the
//! same resource differ in attributes.

use serde_json::Value;

/// The identity of a resource object: its `(type, id)` pair.
///
/// Derived from any JSON object carrying `type` and `id` members, so it works
/// for full resource objects and for linkage objects alike. An object without
/// both members has no identity and never compares equal to anything.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    type_name: String,
    id: String,
}

impl ResourceKey {
    /// Extracts the identity of `resource`, if it has one.
    ///
    /// String members are taken as-is; numeric members by their canonical
    /// rendering, so `7` and `"7"` share an identity. Any other shape yields
    /// `None`.
    pub fn of(resource: &Value) -> Option<ResourceKey> {
        let object = resource.as_object()?;
        let type_name = identity_component(object.get("type")?)?;
        let id = identity_component(object.get("id")?)?;
        Some(ResourceKey { type_name, id })
    }

    #[inline(always)]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.id
    }
}

fn identity_component(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
