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

//! The contract model: the runtime description of one resource type.
//!
//! A [`Contract`] names a resource type on the wire, knows how to create an
//! empty instance of its domain type, and carries the ordered fields and
//! relationships through which the codec reads and writes concrete entities.
//! Contracts are built once with [`ContractBuilder`], registered with a
//! resolver, and are read-only afterwards.

use std::any::TypeId;
use std::fmt;
use std::rc::Rc;

use crate::entity::EntityRef;
use crate::error::Error;
use crate::types::{DeclaredType, FieldOptions, RelationshipKind};

pub mod accessor;
pub mod builder;

pub use accessor::{FieldAccessor, FieldValue};
pub use builder::{ContractBuilder, RelationshipBuilder};

/// One named field of a resource type.
///
/// The `name` is the in-memory camelCase identifier; the wire form is derived
/// by the codec. Fields are shared via `Rc` so a relationship can reference
/// the same field object the contract lists.
pub struct Field {
    name: String,
    declared: DeclaredType,
    options: FieldOptions,
    accessor: FieldAccessor,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        declared: DeclaredType,
        options: FieldOptions,
        accessor: FieldAccessor,
    ) -> Self {
        Field {
            name: name.into(),
            declared,
            options,
            accessor,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    #[inline(always)]
    pub fn options(&self) -> FieldOptions {
        self.options
    }

    #[inline(always)]
    pub fn is_id(&self) -> bool {
        self.options.is_id()
    }

    #[inline(always)]
    pub fn can_serialize(&self) -> bool {
        self.options.can_serialize()
    }

    #[inline(always)]
    pub fn can_deserialize(&self) -> bool {
        self.options.can_deserialize()
    }

    /// Reads the field from `entity`.
    pub fn get(&self, entity: &EntityRef) -> Result<FieldValue, Error> {
        self.accessor.get(entity)
    }

    /// Writes `value` into the field of `entity`.
    pub fn set(&self, entity: &EntityRef, value: FieldValue) -> Result<(), Error> {
        self.accessor.set(entity, value)
    }

    pub(crate) fn matches(&self, camel_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(camel_name)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A relationship between two resource types.
///
/// At least one of `field` (the navigation accessor exposing the related
/// entity or entities) and `via_field` (the scalar foreign-key accessor) must
/// be present for the relationship to carry linkage data; a relationship with
/// neither still emits its `related` link when a template is set.
pub struct Relationship {
    name: String,
    kind: RelationshipKind,
    related_to: TypeId,
    field: Option<Rc<Field>>,
    via_field: Option<Rc<Field>>,
    uri_template: Option<String>,
}

impl Relationship {
    pub(crate) fn new(
        name: String,
        kind: RelationshipKind,
        related_to: TypeId,
        field: Option<Rc<Field>>,
        via_field: Option<Rc<Field>>,
        uri_template: Option<String>,
    ) -> Self {
        Relationship {
            name,
            kind,
            related_to,
            field,
            via_field,
            uri_template,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Runtime type of the peer resource.
    #[inline(always)]
    pub fn related_to(&self) -> TypeId {
        self.related_to
    }

    #[inline(always)]
    pub fn field(&self) -> Option<&Rc<Field>> {
        self.field.as_ref()
    }

    #[inline(always)]
    pub fn via_field(&self) -> Option<&Rc<Field>> {
        self.via_field.as_ref()
    }

    #[inline(always)]
    pub fn uri_template(&self) -> Option<&str> {
        self.uri_template.as_deref()
    }

    /// The navigation field if present, else the foreign-key field.
    #[inline(always)]
    pub fn effective_field(&self) -> Option<&Rc<Field>> {
        self.field.as_ref().or(self.via_field.as_ref())
    }

    /// True if this relationship contributes linkage data to wire output.
    pub(crate) fn should_serialize(&self) -> bool {
        self.effective_field()
            .is_some_and(|f| f.can_serialize() && !f.is_id())
    }

    /// True if this relationship accepts linkage data from wire input.
    pub(crate) fn should_deserialize(&self) -> bool {
        self.via_field.as_ref().is_some_and(|f| f.can_deserialize())
            || self.field.as_ref().is_some_and(|f| f.can_deserialize())
    }

    /// True if `field_name` backs this relationship (as navigation or
    /// foreign key).
    pub(crate) fn references_field(&self, field_name: &str) -> bool {
        self.field.as_ref().is_some_and(|f| f.matches(field_name))
            || self.via_field.as_ref().is_some_and(|f| f.matches(field_name))
    }

    pub(crate) fn matches(&self, camel_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(camel_name)
    }
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("has_field", &self.field.is_some())
            .field("has_via_field", &self.via_field.is_some())
            .field("uri_template", &self.uri_template)
            .finish_non_exhaustive()
    }
}

/// The runtime description of one resource type.
pub struct Contract {
    name: String,
    runtime_type: TypeId,
    factory: Box<dyn Fn() -> EntityRef>,
    fields: Vec<Rc<Field>>,
    relationships: Vec<Relationship>,
}

impl Contract {
    /// Starts a builder for the domain type `T` under the wire tag `name`.
    pub fn builder<T: Default + 'static>(name: &str) -> ContractBuilder<T> {
        ContractBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        runtime_type: TypeId,
        factory: Box<dyn Fn() -> EntityRef>,
        fields: Vec<Rc<Field>>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Contract {
            name,
            runtime_type,
            factory,
            fields,
            relationships,
        }
    }

    /// The wire tag, e.g. `"posts"`.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime type of the domain entities this contract describes.
    #[inline(always)]
    pub fn runtime_type(&self) -> TypeId {
        self.runtime_type
    }

    /// Creates an empty entity ready for population.
    pub fn create_instance(&self) -> EntityRef {
        (self.factory)()
    }

    #[inline(always)]
    pub fn fields(&self) -> &[Rc<Field>] {
        &self.fields
    }

    #[inline(always)]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// The primary-key field, if the contract has one. Contracts without an
    /// id field describe value-type resources serialized without an `id`.
    pub fn id_field(&self) -> Option<&Rc<Field>> {
        self.fields.iter().find(|f| f.is_id())
    }

    /// True if `field_name` backs any relationship of this contract; such
    /// fields never appear as attributes.
    pub(crate) fn is_relationship_backing(&self, field_name: &str) -> bool {
        self.relationships
            .iter()
            .any(|r| r.references_field(field_name))
    }

    pub(crate) fn find_relationship(&self, camel_name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.matches(camel_name))
    }

    pub(crate) fn find_field(&self, camel_name: &str) -> Option<&Rc<Field>> {
        self.fields.iter().find(|f| f.matches(camel_name))
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("relationships", &self.relationships)
            .finish_non_exhaustive()
    }
}
