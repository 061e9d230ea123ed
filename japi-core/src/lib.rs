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

//! # Japi Core
//!
//! This is the core implementation of the japi codec: a bidirectional
//! translation between in-memory domain entities and the JSON:API 1.0
//! document format, driven by a declarative contract model.
//!
//! ## Architecture
//!
//! The core library is organized into several key modules:
//!
//! - **`japi`**: Main codec engine and public API
//! - **`contract`**: The contract model: fields, relationships, accessors
//!   and the fluent builders that produce them
//! - **`resolver`**: Contract resolution by runtime type or wire name, plus
//!   the resource identity key
//! - **`document`**: The per-document writer and reader
//! - **`scalar`**: The leaf-value codec between Rust scalars and JSON
//! - **`entity`**: The shared, type-erased entity handle
//! - **`naming`**: camelCase / dash-case name transforms
//! - **`uri`**: URI template binding for `related` links
//! - **`types`**: Field options, scalar kinds and relationship kinds
//! - **`error`**: Error handling
//!
//! ## Key Concepts
//!
//! ### Contracts
//!
//! Domain types stay plain Rust structs; a [`Contract`](contract::Contract)
//! describes one resource type at runtime: its wire tag, an instance
//! factory, and ordered fields and relationships, each owning a typed
//! accessor pair installed at build time. No dynamic member resolution
//! happens while coding a document.
//!
//! ### Compound documents
//!
//! Serialization walks the entity graph depth-first and emits a compound
//! document: primary resources under `data`, every other reachable resource
//! under `included`, deduplicated by `(type, id)` identity so cyclic and
//! diamond-shaped graphs stay finite.
//!
//! ### Identity-preserving materialization
//!
//! Deserialization resolves relationship linkages against the document's
//! `included` side-car and primary `data`, caching each materialized
//! identity. Resources sharing an identity come back as the *same* entity
//! handle, reconstructing shared references and cycles.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `japi` crate.
//! However, you can use the core types directly:
//!
//! ```rust
//! use japi_core::contract::Contract;
//! use japi_core::entity::EntityRef;
//! use japi_core::japi::Japi;
//! use japi_core::types::ScalarKind;
//!
//! #[derive(Default)]
//! struct Post {
//!     id: i64,
//!     title: Option<String>,
//! }
//!
//! let codec = Japi::default().register(
//!     Contract::builder::<Post>("posts")
//!         .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
//!         .attribute(
//!             "title",
//!             ScalarKind::String,
//!             |p: &Post| p.title.clone(),
//!             |p, v| p.title = Some(v),
//!         )
//!         .build(),
//! );
//!
//! let entity = EntityRef::new(Post { id: 7, title: Some("Hello".into()) });
//! let document = codec.serialize_entity(&entity).unwrap();
//! assert_eq!(document["data"]["type"], "posts");
//! ```

pub mod config;
pub mod contract;
pub mod document;
pub mod entity;
pub mod error;
pub mod japi;
pub mod naming;
pub mod resolver;
pub mod scalar;
pub mod types;
pub mod uri;

pub use crate::config::Config;
pub use crate::entity::EntityRef;
pub use crate::error::Error;
pub use crate::japi::Japi;

/// Global flag to check if ENABLE_JAPI_DEBUG_OUTPUT environment variable is set at compile time.
/// Set ENABLE_JAPI_DEBUG_OUTPUT=1 at compile time to enable debug output.
pub const ENABLE_JAPI_DEBUG_OUTPUT: bool = option_env!("ENABLE_JAPI_DEBUG_OUTPUT").is_some();
