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

//! Fluent construction of contracts from typed closures.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use japi_core::contract::{Contract, RelationshipBuilder};
//! use japi_core::types::ScalarKind;
//!
//! #[derive(Default)]
//! struct User {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! #[derive(Default)]
//! struct Post {
//!     id: i64,
//!     title: Option<String>,
//!     owner: Option<Rc<RefCell<User>>>,
//! }
//!
//! let posts = Contract::builder::<Post>("posts")
//!     .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
//!     .attribute(
//!         "title",
//!         ScalarKind::String,
//!         |p: &Post| p.title.clone(),
//!         |p, v| p.title = Some(v),
//!     )
//!     .relationship(
//!         RelationshipBuilder::<Post, User>::belongs_to("owner")
//!             .field(|p| p.owner.clone(), |p, v| p.owner = Some(v))
//!             .build(),
//!     )
//!     .build();
//! assert_eq!(posts.name(), "posts");
//! ```

use std::any::TypeId;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::contract::accessor::FieldAccessor;
use crate::contract::{Contract, Field, Relationship};
use crate::entity::EntityRef;
use crate::types::{DeclaredType, FieldOptions, RelationshipKind, ScalarKind};

/// Builds a [`Contract`] for the domain type `T`.
pub struct ContractBuilder<T> {
    name: String,
    factory: Box<dyn Fn() -> EntityRef>,
    fields: Vec<Rc<Field>>,
    relationships: Vec<Relationship>,
    marker: PhantomData<fn() -> T>,
}

impl<T: Default + 'static> ContractBuilder<T> {
    /// Starts a contract for `T` using `T::default()` as the instance
    /// factory.
    pub fn new(name: &str) -> Self {
        Self::with_factory(name, T::default)
    }
}

impl<T: 'static> ContractBuilder<T> {
    /// Starts a contract for `T` with an explicit instance factory.
    pub fn with_factory(name: &str, factory: impl Fn() -> T + 'static) -> Self {
        ContractBuilder {
            name: name.to_owned(),
            factory: Box::new(move || EntityRef::new(factory())),
            fields: Vec::new(),
            relationships: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Installs the primary-key field. Its value becomes the resource `id`
    /// and never appears among the attributes.
    pub fn id<V: 'static>(
        self,
        name: &str,
        kind: ScalarKind,
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        self.field(Field::new(
            name,
            DeclaredType::Scalar(kind),
            FieldOptions::ID | FieldOptions::DEFAULT,
            FieldAccessor::scalar(get, set),
        ))
    }

    /// Installs a plain attribute with default options (readable and
    /// writable).
    pub fn attribute<V: 'static>(
        self,
        name: &str,
        kind: ScalarKind,
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        self.field(Field::new(
            name,
            DeclaredType::Scalar(kind),
            FieldOptions::DEFAULT,
            FieldAccessor::scalar(get, set),
        ))
    }

    /// Installs a fully specified field; the escape hatch for custom options
    /// or hand-written accessors.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(Rc::new(field));
        self
    }

    /// Installs a relationship built with [`RelationshipBuilder`].
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn build(self) -> Contract {
        Contract::from_parts(
            self.name,
            TypeId::of::<T>(),
            self.factory,
            self.fields,
            self.relationships,
        )
    }
}

/// Builds a [`Relationship`] on the domain type `T` pointing at the peer
/// type `P`.
pub struct RelationshipBuilder<T, P> {
    name: String,
    kind: RelationshipKind,
    field: Option<Rc<Field>>,
    via_field: Option<Rc<Field>>,
    uri_template: Option<String>,
    marker: PhantomData<fn(T) -> P>,
}

impl<T: 'static, P: 'static> RelationshipBuilder<T, P> {
    /// Starts a singular (zero-or-one) relationship.
    pub fn belongs_to(name: &str) -> Self {
        Self::with_kind(name, RelationshipKind::BelongsTo)
    }

    /// Starts a plural (zero-or-more) relationship.
    pub fn has_many(name: &str) -> Self {
        Self::with_kind(name, RelationshipKind::HasMany)
    }

    fn with_kind(name: &str, kind: RelationshipKind) -> Self {
        RelationshipBuilder {
            name: name.to_owned(),
            kind,
            field: None,
            via_field: None,
            uri_template: None,
            marker: PhantomData,
        }
    }

    /// Installs the navigation accessor exposing the single related entity.
    pub fn field(
        mut self,
        get: impl Fn(&T) -> Option<Rc<RefCell<P>>> + 'static,
        set: impl Fn(&mut T, Rc<RefCell<P>>) + 'static,
    ) -> Self {
        self.field = Some(Rc::new(Field::new(
            self.name.clone(),
            DeclaredType::Reference,
            FieldOptions::DEFAULT | FieldOptions::RELATIONSHIP,
            FieldAccessor::reference(get, set),
        )));
        self
    }

    /// Installs the navigation accessor exposing the full related
    /// collection.
    pub fn fields(
        mut self,
        get: impl Fn(&T) -> Option<Vec<Rc<RefCell<P>>>> + 'static,
        set: impl Fn(&mut T, Vec<Rc<RefCell<P>>>) + 'static,
    ) -> Self {
        self.field = Some(Rc::new(Field::new(
            self.name.clone(),
            DeclaredType::ReferenceList,
            FieldOptions::DEFAULT | FieldOptions::RELATIONSHIP,
            FieldAccessor::reference_list(get, set),
        )));
        self
    }

    /// Installs a fully specified navigation field; the escape hatch for
    /// custom options or declared types.
    pub fn field_with(mut self, field: Field) -> Self {
        self.field = Some(Rc::new(field));
        self
    }

    /// Installs the scalar foreign-key accessor. For a singular relationship
    /// this is the peer's id; plural relationships ignore it on input.
    pub fn via<V: 'static>(
        mut self,
        name: &str,
        kind: ScalarKind,
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        self.via_field = Some(Rc::new(Field::new(
            name,
            DeclaredType::Scalar(kind),
            FieldOptions::DEFAULT | FieldOptions::RELATIONSHIP,
            FieldAccessor::scalar(get, set),
        )));
        self
    }

    /// Installs a fully specified foreign-key field.
    pub fn via_with(mut self, field: Field) -> Self {
        self.via_field = Some(Rc::new(field));
        self
    }

    /// Sets the URI template bound into the relationship's `related` link.
    pub fn related_link(mut self, template: &str) -> Self {
        self.uri_template = Some(template.to_owned());
        self
    }

    pub fn build(self) -> Relationship {
        Relationship::new(
            self.name,
            self.kind,
            TypeId::of::<P>(),
            self.field,
            self.via_field,
            self.uri_template,
        )
    }
}
