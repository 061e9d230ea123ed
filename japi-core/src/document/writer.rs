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

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::config::Config;
use crate::contract::{Contract, FieldValue, Relationship};
use crate::ensure;
use crate::entity::EntityRef;
use crate::error::Error;
use crate::naming::camel_to_dashed;
use crate::resolver::{ContractResolver, ResourceKey};
use crate::scalar::ScalarCodec;
use crate::types::RelationshipKind;
use crate::uri::UriBinder;
use crate::ENABLE_JAPI_DEBUG_OUTPUT;

/// Produces one compound document from an entity graph.
///
/// The writer walks the graph depth-first, emitting each reachable resource
/// exactly once: primaries into `data`, everything else into `included` in
/// first-encounter order. The walk is keyed by resource identity, so cyclic
/// and diamond-shaped graphs serialize as finite documents.
pub struct DocumentWriter<'a> {
    resolver: &'a ContractResolver,
    scalars: &'a dyn ScalarCodec,
    uris: &'a dyn UriBinder,
    config: &'a Config,
    visited: HashSet<ResourceKey>,
    included: Vec<Value>,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(
        resolver: &'a ContractResolver,
        scalars: &'a dyn ScalarCodec,
        uris: &'a dyn UriBinder,
        config: &'a Config,
    ) -> Self {
        DocumentWriter {
            resolver,
            scalars,
            uris,
            config,
            visited: HashSet::new(),
            included: Vec::new(),
        }
    }

    /// Produces a document whose `data` is a single resource object.
    pub fn write_one(mut self, entity: &EntityRef) -> Result<Value, Error> {
        let contract = self.resolver.resolve_entity(entity)?.clone();
        let resource = self.resource_object(entity, &contract)?;
        if let Some(key) = ResourceKey::of(&resource) {
            self.visited.insert(key);
        }
        self.walk_related(entity, &contract, 0)?;

        let mut envelope = Map::new();
        let mut version = Map::new();
        version.insert("version".to_owned(), Value::String("1.0".to_owned()));
        envelope.insert("jsonapi".to_owned(), Value::Object(version));
        envelope.insert("data".to_owned(), resource);
        self.finish(envelope)
    }

    /// Produces a document whose `data` is an array of resource objects in
    /// input order.
    pub fn write_many(mut self, entities: &[EntityRef]) -> Result<Value, Error> {
        let mut contracts = Vec::with_capacity(entities.len());
        let mut resources = Vec::with_capacity(entities.len());
        for entity in entities {
            let contract = self.resolver.resolve_entity(entity)?.clone();
            let resource = self.resource_object(entity, &contract)?;
            if let Some(key) = ResourceKey::of(&resource) {
                self.visited.insert(key);
            }
            resources.push(resource);
            contracts.push(contract);
        }
        // All primaries are recorded before any of them is walked, so a
        // primary reached through another primary's relationships never
        // lands in `included`.
        for (entity, contract) in entities.iter().zip(&contracts) {
            self.walk_related(entity, contract, 0)?;
        }

        let mut envelope = Map::new();
        envelope.insert("data".to_owned(), Value::Array(resources));
        self.finish(envelope)
    }

    fn finish(self, mut envelope: Map<String, Value>) -> Result<Value, Error> {
        if ENABLE_JAPI_DEBUG_OUTPUT {
            println!(
                "japi: document complete, {} visited, {} included",
                self.visited.len(),
                self.included.len()
            );
        }
        if !self.included.is_empty() {
            envelope.insert("included".to_owned(), Value::Array(self.included));
        }
        Ok(Value::Object(envelope))
    }

    /// Emits the resource object for one entity: `type`, `id`, `attributes`
    /// and `relationships`, in that member order.
    fn resource_object(&self, entity: &EntityRef, contract: &Contract) -> Result<Value, Error> {
        let mut object = Map::new();
        object.insert(
            "type".to_owned(),
            Value::String(contract.name().to_owned()),
        );

        if let Some(id_field) = contract.id_field() {
            if id_field.can_serialize() {
                match id_field.get(entity)? {
                    FieldValue::Scalar(raw) => {
                        let id = self.scalars.serialize_value(raw.as_ref())?;
                        if !id.is_null() {
                            object.insert("id".to_owned(), id);
                        }
                    }
                    FieldValue::Null => {}
                    _ => {
                        return Err(Error::type_error(format!(
                            "id field `{}` must yield a scalar",
                            id_field.name()
                        )))
                    }
                }
            }
        }

        let mut attributes = Map::new();
        for field in contract.fields() {
            if !field.can_serialize()
                || field.is_id()
                || contract.is_relationship_backing(field.name())
            {
                continue;
            }
            match field.get(entity)? {
                FieldValue::Scalar(raw) => {
                    let value = self.scalars.serialize_value(raw.as_ref())?;
                    if !value.is_null() {
                        attributes.insert(camel_to_dashed(field.name()), value);
                    }
                }
                FieldValue::Null => {}
                _ => {
                    return Err(Error::type_error(format!(
                        "attribute `{}` must yield a scalar",
                        field.name()
                    )))
                }
            }
        }
        if !attributes.is_empty() {
            object.insert("attributes".to_owned(), Value::Object(attributes));
        }

        let mut relationships = Map::new();
        for relationship in contract.relationships() {
            if let Some(rel_object) = self.relationship_object(entity, contract, relationship)? {
                relationships.insert(camel_to_dashed(relationship.name()), rel_object);
            }
        }
        if !relationships.is_empty() {
            object.insert("relationships".to_owned(), Value::Object(relationships));
        }

        Ok(Value::Object(object))
    }

    /// Emits one relationship object, or `None` when it would be empty.
    fn relationship_object(
        &self,
        entity: &EntityRef,
        contract: &Contract,
        relationship: &Relationship,
    ) -> Result<Option<Value>, Error> {
        let mut object = Map::new();

        if let Some(template) = relationship.uri_template() {
            let url = self.uris.bind(template, entity, contract, self.scalars)?;
            let mut links = Map::new();
            links.insert("related".to_owned(), Value::String(url));
            object.insert("links".to_owned(), Value::Object(links));
        }

        if relationship.should_serialize() {
            // should_serialize guarantees the effective field exists, is
            // readable and is not the id.
            if let Some(field) = relationship.effective_field() {
                match (relationship.kind(), field.get(entity)?) {
                    // A null current value omits the `data` member entirely.
                    (_, FieldValue::Null) => {}
                    (RelationshipKind::BelongsTo, FieldValue::Reference(related)) => {
                        let linkage = self.linkage(relationship, &related)?;
                        object.insert("data".to_owned(), linkage);
                    }
                    // The related value is already the peer's id (a bare
                    // foreign key).
                    (RelationshipKind::BelongsTo, FieldValue::Scalar(raw)) => {
                        let peer = self.resolver.resolve_type(relationship.related_to())?;
                        let mut linkage = Map::new();
                        linkage.insert(
                            "type".to_owned(),
                            Value::String(peer.name().to_owned()),
                        );
                        linkage.insert("id".to_owned(), self.scalars.serialize_value(raw.as_ref())?);
                        object.insert("data".to_owned(), Value::Object(linkage));
                    }
                    (RelationshipKind::BelongsTo, FieldValue::References(_)) => {
                        return Err(Error::shape_mismatch(format!(
                            "relationship `{}` is singular but yielded a collection",
                            relationship.name()
                        )))
                    }
                    (RelationshipKind::HasMany, FieldValue::References(related)) => {
                        let mut linkages = Vec::with_capacity(related.len());
                        for entity in &related {
                            linkages.push(self.linkage(relationship, entity)?);
                        }
                        object.insert("data".to_owned(), Value::Array(linkages));
                    }
                    (RelationshipKind::HasMany, _) => {
                        return Err(Error::non_iterable(format!(
                            "relationship `{}` did not yield an iterable value",
                            relationship.name()
                        )))
                    }
                }
            }
        }

        Ok(if object.is_empty() {
            None
        } else {
            Some(Value::Object(object))
        })
    }

    /// Emits the `{type, id}` pair identifying a related entity, reading the
    /// id through the peer contract's id field.
    fn linkage(&self, relationship: &Relationship, related: &EntityRef) -> Result<Value, Error> {
        let peer = self.resolver.resolve_type(relationship.related_to())?;
        let mut linkage = Map::new();
        linkage.insert("type".to_owned(), Value::String(peer.name().to_owned()));
        if let Some(id_field) = peer.id_field() {
            if id_field.can_serialize() {
                if let FieldValue::Scalar(raw) = id_field.get(related)? {
                    let id = self.scalars.serialize_value(raw.as_ref())?;
                    if !id.is_null() {
                        linkage.insert("id".to_owned(), id);
                    }
                }
            }
        }
        Ok(Value::Object(linkage))
    }

    /// Walks the relationships of one resource, pulling every related entity
    /// not yet seen into `included`.
    fn walk_related(
        &mut self,
        entity: &EntityRef,
        contract: &Contract,
        depth: u32,
    ) -> Result<(), Error> {
        ensure!(
            depth < self.config.max_depth,
            Error::depth_exceeded(format!(
                "related-resource walk exceeded {} levels",
                self.config.max_depth
            ))
        );
        for relationship in contract.relationships() {
            if !relationship.should_serialize() {
                continue;
            }
            let Some(field) = relationship.effective_field() else {
                continue;
            };
            match field.get(entity)? {
                FieldValue::Reference(related) => self.include(&related, depth)?,
                FieldValue::References(related) => {
                    for entity in &related {
                        self.include(entity, depth)?;
                    }
                }
                // A bare foreign key names a peer the graph does not carry.
                _ => {}
            }
        }
        Ok(())
    }

    /// Adds one related entity to `included` unless its identity was already
    /// seen, then recurses into its own relationships.
    fn include(&mut self, entity: &EntityRef, depth: u32) -> Result<(), Error> {
        let contract = self.resolver.resolve_entity(entity)?.clone();
        let resource = self.resource_object(entity, &contract)?;
        match ResourceKey::of(&resource) {
            Some(key) => {
                if !self.visited.insert(key) {
                    return Ok(());
                }
            }
            // A resource without an identity cannot be deduplicated; it is
            // emitted at each encounter.
            None => {}
        }
        self.included.push(resource);
        self.walk_related(entity, &contract, depth + 1)
    }
}
