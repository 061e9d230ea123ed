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

//! Tests for the failure modes: shape mismatches, resolver misses, broken
//! collections and the depth guard.

use japi::{Contract, EntityRef, Error, Japi, RelationshipBuilder, ScalarKind};
use japi_tests::models::{blog_codec, posts_codec, user, users_contract, Post, User};
use serde_json::json;

#[test]
fn test_single_entry_rejects_an_array() {
    let codec = posts_codec();
    let document = json!({"data": [{"type": "posts", "id": 1}]});
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_many_entry_rejects_a_single_object() {
    let codec = posts_codec();
    let document = json!({"data": {"type": "posts", "id": 1}});
    let err = codec.deserialize_many(&document).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_document_without_data_is_rejected() {
    let codec = posts_codec();
    let err = codec.deserialize_entity(&json!({"meta": {}})).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));

    let err = codec.deserialize_entity(&json!("nonsense")).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_serializing_an_unregistered_type_fails() {
    let codec = posts_codec();
    let err = codec
        .serialize_entity(&EntityRef::new(User::default()))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownType(_)));
}

#[test]
fn test_deserializing_an_unknown_wire_type_fails() {
    let codec = posts_codec();
    let document = json!({"data": {"type": "movies", "id": 1}});
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::UnknownType(_)));
}

#[test]
fn test_resource_without_a_type_is_rejected() {
    let codec = posts_codec();
    let document = json!({"data": {"id": 1}});
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_singular_relationship_rejects_an_array() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": [{"type": "users", "id": 9}]}}
        }
    });
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_plural_relationship_rejects_an_object() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "users",
            "id": 1,
            "relationships": {"friends": {"data": {"type": "users", "id": 2}}}
        }
    });
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

/// A plural relationship wired up with a singular navigation accessor.
fn broken_plural_codec() -> Japi {
    Japi::default().register(users_contract()).register(
        Contract::builder::<Post>("posts")
            .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
            .relationship(
                RelationshipBuilder::<Post, User>::has_many("owner")
                    .field(|p| p.owner.clone(), |p, v| p.owner = Some(v))
                    .build(),
            )
            .build(),
    )
}

#[test]
fn test_non_iterable_plural_value_fails_to_serialize() {
    let codec = broken_plural_codec();
    let post = EntityRef::new(Post {
        id: 1,
        owner: Some(user(9, "A")),
        ..Post::default()
    });
    let err = codec.serialize_entity(&post).unwrap_err();
    assert!(matches!(err, Error::NonIterableHasMany(_)));
}

#[test]
fn test_unconstructible_plural_target_fails_to_deserialize() {
    let codec = broken_plural_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": [{"type": "users", "id": 9}]}}
        }
    });
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::UnconstructibleCollection(_)));
}

#[test]
fn test_uncoercible_attribute_fails() {
    let codec = posts_codec();
    let document = json!({
        "data": {"type": "posts", "id": 1, "attributes": {"title": 42}}
    });
    let err = codec.deserialize_entity(&document).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_deep_distinct_chain_hits_the_depth_guard() {
    let codec = blog_codec().max_depth(3);
    // A straight friends chain of distinct identities: no deduplication can
    // cut it short.
    let head = user(1, "head");
    let mut tail = head.clone();
    for id in 2..10 {
        let next = user(id, "link");
        tail.borrow_mut().friends.push(next.clone());
        tail = next;
    }

    let err = codec
        .serialize_entity(&EntityRef::from_rc(head))
        .unwrap_err();
    assert!(matches!(err, Error::DepthExceeded(_)));
}

#[test]
fn test_a_graph_within_the_depth_bound_serializes() {
    let codec = blog_codec().max_depth(3);
    let head = user(1, "head");
    let next = user(2, "link");
    head.borrow_mut().friends.push(next);

    assert!(codec.serialize_entity(&EntityRef::from_rc(head)).is_ok());
}
