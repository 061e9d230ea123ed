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

use std::collections::HashMap;

use serde_json::Value;

use crate::config::Config;
use crate::contract::{Contract, Field, FieldValue, Relationship};
use crate::ensure;
use crate::entity::EntityRef;
use crate::error::Error;
use crate::naming::dashed_to_camel;
use crate::resolver::{ContractResolver, ResourceKey};
use crate::scalar::ScalarCodec;
use crate::types::{DeclaredType, RelationshipKind};
use crate::ENABLE_JAPI_DEBUG_OUTPUT;

/// Reconstructs an entity graph from one compound document.
///
/// Materialization is identity-preserving: the reader keeps a cache keyed by
/// resource identity, and every linkage that names an already-materialized
/// identity resolves to the same entity handle. An entity is inserted into
/// the cache *before* its fields are populated, which is what lets cyclic
/// documents materialize.
pub struct DocumentReader<'a> {
    resolver: &'a ContractResolver,
    scalars: &'a dyn ScalarCodec,
    config: &'a Config,
    envelope: &'a Value,
    cache: HashMap<ResourceKey, EntityRef>,
}

impl<'a> DocumentReader<'a> {
    pub fn new(
        resolver: &'a ContractResolver,
        scalars: &'a dyn ScalarCodec,
        config: &'a Config,
        envelope: &'a Value,
    ) -> Self {
        DocumentReader {
            resolver,
            scalars,
            config,
            envelope,
            cache: HashMap::new(),
        }
    }

    /// Materializes the single resource in `data`.
    pub fn read_one(mut self) -> Result<EntityRef, Error> {
        let data = self.primary_data()?;
        match data {
            Value::Object(_) => self.materialize(data, 0),
            Value::Array(_) => Err(Error::shape_mismatch(
                "expected a single resource in `data`, found an array",
            )),
            _ => Err(Error::shape_mismatch("`data` must be a resource object")),
        }
    }

    /// Materializes every resource in the `data` array, in document order.
    pub fn read_many(mut self) -> Result<Vec<EntityRef>, Error> {
        let data = self.primary_data()?;
        let Value::Array(resources) = data else {
            return Err(Error::shape_mismatch(
                "expected an array of resources in `data`",
            ));
        };
        let entities = resources
            .iter()
            .map(|resource| self.materialize(resource, 0))
            .collect::<Result<Vec<_>, Error>>()?;
        if ENABLE_JAPI_DEBUG_OUTPUT {
            println!(
                "japi: materialized {} primary entities, {} cached identities",
                entities.len(),
                self.cache.len()
            );
        }
        Ok(entities)
    }

    fn primary_data(&self) -> Result<&'a Value, Error> {
        let document = self.envelope;
        let object = document
            .as_object()
            .ok_or_else(|| Error::shape_mismatch("document must be a JSON object"))?;
        object
            .get("data")
            .ok_or_else(|| Error::shape_mismatch("document has no `data` member"))
    }

    /// Turns one resource JSON object into an entity, returning the cached
    /// handle when the resource's identity has been seen before.
    fn materialize(&mut self, resource: &'a Value, depth: u32) -> Result<EntityRef, Error> {
        ensure!(
            depth < self.config.max_depth,
            Error::depth_exceeded(format!(
                "materialization exceeded {} levels",
                self.config.max_depth
            ))
        );
        let object = resource
            .as_object()
            .ok_or_else(|| Error::shape_mismatch("resource must be a JSON object"))?;

        let key = ResourceKey::of(resource);
        if let Some(key) = &key {
            if let Some(cached) = self.cache.get(key) {
                return Ok(cached.clone());
            }
        }

        let type_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::shape_mismatch("resource object has no string `type` member"))?;
        let contract = self.resolver.resolve_name(type_name)?.clone();

        let entity = contract.create_instance();
        // Cached before population so linkages back to this resource, at any
        // depth, resolve to the same handle.
        if let Some(key) = key {
            self.cache.insert(key, entity.clone());
        }

        if let Some(id_value) = object.get("id") {
            self.populate_id(&entity, &contract, id_value)?;
        }

        if let Some(attributes) = object.get("attributes") {
            let attributes = attributes
                .as_object()
                .ok_or_else(|| Error::shape_mismatch("`attributes` must be a JSON object"))?;
            for (wire_name, value) in attributes {
                if value.is_null() {
                    continue;
                }
                self.populate_attribute(&entity, &contract, wire_name, value)?;
            }
        }

        if let Some(relationships) = object.get("relationships") {
            let relationships = relationships
                .as_object()
                .ok_or_else(|| Error::shape_mismatch("`relationships` must be a JSON object"))?;
            for (wire_name, member) in relationships {
                // Links-only members are permitted and ignored.
                let Some(data) = member.get("data") else {
                    continue;
                };
                let camel = dashed_to_camel(wire_name);
                let Some(relationship) = contract.find_relationship(&camel) else {
                    continue;
                };
                if !relationship.should_deserialize() {
                    continue;
                }
                match relationship.kind() {
                    RelationshipKind::BelongsTo => {
                        self.read_belongs_to(&entity, relationship, data, depth)?
                    }
                    RelationshipKind::HasMany => {
                        self.read_has_many(&entity, relationship, data, depth)?
                    }
                }
            }
        }

        Ok(entity)
    }

    fn populate_id(
        &self,
        entity: &EntityRef,
        contract: &Contract,
        id_value: &Value,
    ) -> Result<(), Error> {
        let Some(id_field) = contract.id_field() else {
            return Ok(());
        };
        if !id_field.can_deserialize() || id_value.is_null() {
            return Ok(());
        }
        let DeclaredType::Scalar(kind) = id_field.declared() else {
            return Ok(());
        };
        let raw = self.scalars.deserialize_value(kind, id_value)?;
        id_field.set(entity, FieldValue::Scalar(raw))
    }

    fn populate_attribute(
        &self,
        entity: &EntityRef,
        contract: &Contract,
        wire_name: &str,
        value: &Value,
    ) -> Result<(), Error> {
        let camel = dashed_to_camel(wire_name);
        // Unknown attributes are silently discarded.
        let Some(field) = contract
            .fields()
            .iter()
            .find(|f| self.accepts_attribute(contract, f) && f.matches(&camel))
        else {
            return Ok(());
        };
        let DeclaredType::Scalar(kind) = field.declared() else {
            return Ok(());
        };
        let raw = self.scalars.deserialize_value(kind, value)?;
        field.set(entity, FieldValue::Scalar(raw))
    }

    /// A field takes attribute input when it is writable, is not the id, and
    /// does not back a relationship (which would double-write it).
    fn accepts_attribute(&self, contract: &Contract, field: &Field) -> bool {
        field.can_deserialize() && !field.is_id() && !contract.is_relationship_backing(field.name())
    }

    fn read_belongs_to(
        &mut self,
        entity: &EntityRef,
        relationship: &Relationship,
        data: &'a Value,
        depth: u32,
    ) -> Result<(), Error> {
        if data.is_null() {
            return Ok(());
        }
        let linkage = data.as_object().ok_or_else(|| {
            Error::shape_mismatch(format!(
                "relationship `{}` is singular but `data` is not an object",
                relationship.name()
            ))
        })?;

        // The foreign key is written even when the linkage target is not
        // carried by the document.
        if let Some(id_value) = linkage.get("id") {
            if let Some(via) = relationship.via_field() {
                if via.can_deserialize() && !id_value.is_null() {
                    if let DeclaredType::Scalar(kind) = via.declared() {
                        let raw = self.scalars.deserialize_value(kind, id_value)?;
                        via.set(entity, FieldValue::Scalar(raw))?;
                    }
                }
            }
        }

        if let Some(field) = relationship.field() {
            if field.can_deserialize() {
                // An unresolvable linkage leaves the field at its factory
                // default; that is not an error.
                if let Some(related) = self.resolve_linkage(data, depth)? {
                    let field = field.clone();
                    field.set(entity, FieldValue::Reference(related))?;
                }
            }
        }
        Ok(())
    }

    fn read_has_many(
        &mut self,
        entity: &EntityRef,
        relationship: &Relationship,
        data: &'a Value,
        depth: u32,
    ) -> Result<(), Error> {
        let linkages = data.as_array().ok_or_else(|| {
            Error::shape_mismatch(format!(
                "relationship `{}` is plural but `data` is not an array",
                relationship.name()
            ))
        })?;
        // Only the navigation field is consulted for plural relationships.
        let Some(field) = relationship.field() else {
            return Ok(());
        };
        if !field.can_deserialize() {
            return Ok(());
        }
        if field.declared() != DeclaredType::ReferenceList {
            return Err(Error::unconstructible_collection(format!(
                "cannot materialize a collection for relationship `{}`",
                relationship.name()
            )));
        }
        let field = field.clone();
        let mut resolved = Vec::with_capacity(linkages.len());
        for linkage in linkages {
            if let Some(related) = self.resolve_linkage(linkage, depth)? {
                resolved.push(related);
            }
        }
        field.set(entity, FieldValue::References(resolved))
    }

    /// Resolves a `{type, id}` linkage: first against the cache, then against
    /// `included`, then against the primary `data` array. An identity the
    /// document does not carry resolves to `None`.
    fn resolve_linkage(
        &mut self,
        linkage: &'a Value,
        depth: u32,
    ) -> Result<Option<EntityRef>, Error> {
        let Some(key) = ResourceKey::of(linkage) else {
            return Ok(None);
        };
        if let Some(cached) = self.cache.get(&key) {
            return Ok(Some(cached.clone()));
        }
        if let Some(resource) = self.find_resource(&key) {
            return self.materialize(resource, depth + 1).map(Some);
        }
        Ok(None)
    }

    fn find_resource(&self, key: &ResourceKey) -> Option<&'a Value> {
        let object = self.envelope.as_object()?;
        if let Some(Value::Array(included)) = object.get("included") {
            if let Some(resource) = included
                .iter()
                .find(|resource| ResourceKey::of(resource).as_ref() == Some(key))
            {
                return Some(resource);
            }
        }
        if let Some(Value::Array(primary)) = object.get("data") {
            if let Some(resource) = primary
                .iter()
                .find(|resource| ResourceKey::of(resource).as_ref() == Some(key))
            {
                return Some(resource);
            }
        }
        None
    }
}
