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

use serde_json::Value;

use crate::config::Config;
use crate::contract::Contract;
use crate::document::{DocumentReader, DocumentWriter};
use crate::entity::EntityRef;
use crate::error::Error;
use crate::resolver::ContractResolver;
use crate::scalar::{DefaultScalarCodec, ScalarCodec};
use crate::uri::{TemplateBinder, UriBinder};

/// The main japi codec instance.
///
/// `Japi` owns the contract resolver, the scalar codec and the URI binder,
/// and hands out per-document writers and readers. It is read-only after
/// construction; every operation creates fresh per-document state, so one
/// instance serves any number of documents.
///
/// # Examples
///
/// ```rust
/// use japi_core::contract::Contract;
/// use japi_core::entity::EntityRef;
/// use japi_core::japi::Japi;
/// use japi_core::types::ScalarKind;
///
/// #[derive(Default)]
/// struct Post {
///     id: i64,
///     title: Option<String>,
/// }
///
/// # fn main() -> Result<(), japi_core::error::Error> {
/// let codec = Japi::default().register(
///     Contract::builder::<Post>("posts")
///         .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
///         .attribute(
///             "title",
///             ScalarKind::String,
///             |p: &Post| p.title.clone(),
///             |p, v| p.title = Some(v),
///         )
///         .build(),
/// );
///
/// let entity = EntityRef::new(Post {
///     id: 7,
///     title: Some("Hello".to_string()),
/// });
/// let document = codec.serialize_entity(&entity)?;
/// assert_eq!(document["data"]["id"], 7);
/// assert_eq!(document["data"]["attributes"]["title"], "Hello");
///
/// let back = codec.deserialize_entity(&document)?;
/// assert_eq!(back.borrow::<Post>()?.title.as_deref(), Some("Hello"));
/// # Ok(())
/// # }
/// ```
pub struct Japi {
    resolver: ContractResolver,
    scalars: Box<dyn ScalarCodec>,
    uris: Box<dyn UriBinder>,
    config: Config,
}

impl Default for Japi {
    fn default() -> Self {
        Japi {
            resolver: ContractResolver::new(),
            scalars: Box::new(DefaultScalarCodec),
            uris: Box::new(TemplateBinder),
            config: Config::default(),
        }
    }
}

impl Japi {
    /// Registers a contract for one resource type.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    pub fn register(mut self, contract: Contract) -> Self {
        self.resolver.register(contract);
        self
    }

    /// Replaces the leaf-value codec.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    pub fn scalar_codec(mut self, codec: impl ScalarCodec + 'static) -> Self {
        self.scalars = Box::new(codec);
        self
    }

    /// Replaces the URI template binder used for `related` links.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    pub fn uri_binder(mut self, binder: impl UriBinder + 'static) -> Self {
        self.uris = Box::new(binder);
        self
    }

    /// Sets the maximum graph-walk depth.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// The contract resolver this instance dispatches through.
    pub fn resolver(&self) -> &ContractResolver {
        &self.resolver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serializes one entity into a document with a singular `data` member.
    pub fn serialize_entity(&self, entity: &EntityRef) -> Result<Value, Error> {
        self.writer().write_one(entity)
    }

    /// Serializes a sequence of entities into a document whose `data` is an
    /// array preserving input order.
    pub fn serialize_many(&self, entities: &[EntityRef]) -> Result<Value, Error> {
        self.writer().write_many(entities)
    }

    /// Materializes the single resource of a document.
    ///
    /// # Errors
    ///
    /// Errors if the document's `data` member is an array.
    pub fn deserialize_entity(&self, document: &Value) -> Result<EntityRef, Error> {
        self.reader(document).read_one()
    }

    /// Materializes every primary resource of a document.
    ///
    /// # Errors
    ///
    /// Errors if the document's `data` member is not an array.
    pub fn deserialize_many(&self, document: &Value) -> Result<Vec<EntityRef>, Error> {
        self.reader(document).read_many()
    }

    fn writer(&self) -> DocumentWriter<'_> {
        DocumentWriter::new(
            &self.resolver,
            self.scalars.as_ref(),
            self.uris.as_ref(),
            &self.config,
        )
    }

    fn reader<'a>(&'a self, document: &'a Value) -> DocumentReader<'a> {
        DocumentReader::new(&self.resolver, self.scalars.as_ref(), &self.config, document)
    }
}
