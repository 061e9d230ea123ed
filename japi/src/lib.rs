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

//! # Japi
//!
//! Japi is a contract-driven codec between in-memory entity graphs and
//! JSON:API 1.0 compound documents. Domain types stay plain Rust structs;
//! contracts built at startup describe how each resource type reads and
//! writes on the wire, and the codec handles the rest: dash-cased member
//! names, relationship linkage, the deduplicated `included` side-car, and
//! identity-preserving reconstruction of shared references and cycles.
//!
//! ## Key Features
//!
//! - **Compound documents**: primary `data` plus transitively `included`
//!   related resources, each identity emitted exactly once
//! - **Cycle safe**: cyclic and diamond-shaped graphs serialize as finite
//!   documents and materialize back with sharing intact
//! - **No derive, no reflection**: accessors are typed closures installed
//!   at contract-build time
//! - **Pluggable leaves**: the scalar codec and the URI template binder are
//!   trait objects with chrono-aware defaults
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use japi::{Contract, EntityRef, Japi, RelationshipBuilder, ScalarKind};
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
//! # fn main() -> Result<(), japi::Error> {
//! let codec = Japi::default()
//!     .register(
//!         Contract::builder::<User>("users")
//!             .id("id", ScalarKind::Int64, |u: &User| Some(u.id), |u, v| u.id = v)
//!             .attribute(
//!                 "name",
//!                 ScalarKind::String,
//!                 |u: &User| u.name.clone(),
//!                 |u, v| u.name = Some(v),
//!             )
//!             .build(),
//!     )
//!     .register(
//!         Contract::builder::<Post>("posts")
//!             .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
//!             .attribute(
//!                 "title",
//!                 ScalarKind::String,
//!                 |p: &Post| p.title.clone(),
//!                 |p, v| p.title = Some(v),
//!             )
//!             .relationship(
//!                 RelationshipBuilder::<Post, User>::belongs_to("owner")
//!                     .field(|p| p.owner.clone(), |p, v| p.owner = Some(v))
//!                     .build(),
//!             )
//!             .build(),
//!     );
//!
//! let owner = Rc::new(RefCell::new(User {
//!     id: 9,
//!     name: Some("Ada".to_string()),
//! }));
//! let post = EntityRef::new(Post {
//!     id: 1,
//!     title: Some("Hello".to_string()),
//!     owner: Some(owner),
//! });
//!
//! let document = codec.serialize_entity(&post)?;
//! assert_eq!(document["data"]["relationships"]["owner"]["data"]["id"], 9);
//! assert_eq!(document["included"][0]["type"], "users");
//!
//! let back = codec.deserialize_entity(&document)?;
//! let back = back.borrow::<Post>()?;
//! assert_eq!(back.owner.as_ref().unwrap().borrow().name.as_deref(), Some("Ada"));
//! # Ok(())
//! # }
//! ```

pub use japi_core::config::Config;
pub use japi_core::contract::{
    Contract, ContractBuilder, Field, FieldAccessor, FieldValue, Relationship,
    RelationshipBuilder,
};
pub use japi_core::entity::EntityRef;
pub use japi_core::error::Error;
pub use japi_core::japi::Japi;
pub use japi_core::naming::{camel_to_dashed, dashed_to_camel};
pub use japi_core::resolver::{ContractResolver, ResourceKey};
pub use japi_core::scalar::{DefaultScalarCodec, ScalarCodec};
pub use japi_core::types::{DeclaredType, FieldOptions, RelationshipKind, ScalarKind};
pub use japi_core::uri::{TemplateBinder, UriBinder};
