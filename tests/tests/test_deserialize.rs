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

//! Tests for identity-preserving materialization from compound documents.

use std::rc::Rc;

use chrono::NaiveDate;
use japi_tests::models::{articles_codec, blog_codec, posts_codec, Post, User};
use serde_json::json;

#[test]
fn test_id_and_attributes_populate() {
    let codec = posts_codec();
    let document = json!({
        "data": {"type": "posts", "id": 7, "attributes": {"title": "Hello"}}
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let post = entity.borrow::<Post>().unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.title.as_deref(), Some("Hello"));
}

#[test]
fn test_dash_cased_attribute_names_match_camel_fields() {
    let codec = articles_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "attributes": {"created-at": "2024-03-09", "rating": 4.5}
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let post = entity.borrow::<Post>().unwrap();
    assert_eq!(
        post.created_at,
        Some(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
    );
    assert_eq!(post.rating, Some(4.5));
}

#[test]
fn test_unknown_attributes_are_ignored() {
    let codec = posts_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 7,
            "attributes": {"title": "Hello", "extra": "v"}
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().title.as_deref(), Some("Hello"));
}

#[test]
fn test_null_attributes_are_skipped() {
    let codec = posts_codec();
    let document = json!({
        "data": {"type": "posts", "id": 7, "attributes": {"title": null}}
    });

    // A null never reaches the scalar codec; the field keeps its factory
    // default.
    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().title, None);
}

#[test]
fn test_shared_identities_materialize_as_one_instance() {
    let codec = blog_codec();
    let document = json!({
        "data": [
            {
                "type": "posts",
                "id": 1,
                "relationships": {"owner": {"data": {"type": "users", "id": 9}}}
            },
            {
                "type": "posts",
                "id": 2,
                "relationships": {"owner": {"data": {"type": "users", "id": 9}}}
            }
        ],
        "included": [
            {"type": "users", "id": 9, "attributes": {"name": "A"}}
        ]
    });

    let entities = codec.deserialize_many(&document).unwrap();
    assert_eq!(entities.len(), 2);
    let p1 = entities[0].borrow::<Post>().unwrap();
    let p2 = entities[1].borrow::<Post>().unwrap();
    let o1 = p1.owner.as_ref().unwrap();
    let o2 = p2.owner.as_ref().unwrap();
    assert!(Rc::ptr_eq(o1, o2));
    assert_eq!(o1.borrow().name.as_deref(), Some("A"));
    // The foreign key is written alongside the resolved navigation field.
    assert_eq!(p1.owner_id, Some(9));
}

#[test]
fn test_foreign_key_written_even_when_unresolvable() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": {"type": "users", "id": 9}}}
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let post = entity.borrow::<Post>().unwrap();
    // Nothing in the document carries users/9; the navigation field stays at
    // its factory default and that is not an error.
    assert!(post.owner.is_none());
    assert_eq!(post.owner_id, Some(9));
}

#[test]
fn test_links_only_relationship_is_ignored() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {
                "owner": {"links": {"related": "https://example.com/posts/1/owner"}}
            }
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let post = entity.borrow::<Post>().unwrap();
    assert!(post.owner.is_none());
    assert_eq!(post.owner_id, None);
}

#[test]
fn test_belongs_to_null_linkage_leaves_the_default() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": null}}
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    assert!(entity.borrow::<Post>().unwrap().owner.is_none());
}

#[test]
fn test_cyclic_document_materializes_with_sharing() {
    let codec = blog_codec();
    let document = json!({
        "jsonapi": {"version": "1.0"},
        "data": {
            "type": "users",
            "id": 1,
            "attributes": {"name": "U1"},
            "relationships": {"friends": {"data": [{"type": "users", "id": 2}]}}
        },
        "included": [
            {
                "type": "users",
                "id": 2,
                "attributes": {"name": "U2"},
                "relationships": {"friends": {"data": [{"type": "users", "id": 1}]}}
            }
        ]
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let u1 = entity.downcast::<User>().unwrap();
    let u2 = u1.borrow().friends[0].clone();
    assert_eq!(u2.borrow().name.as_deref(), Some("U2"));
    // The cycle closes onto the primary entity itself.
    assert!(Rc::ptr_eq(&u2.borrow().friends[0], &u1));
}

#[test]
fn test_linkages_resolve_against_primary_data() {
    let codec = blog_codec();
    let document = json!({
        "data": [
            {
                "type": "users",
                "id": 1,
                "relationships": {"friends": {"data": [{"type": "users", "id": 2}]}}
            },
            {"type": "users", "id": 2, "attributes": {"name": "U2"}}
        ]
    });

    let entities = codec.deserialize_many(&document).unwrap();
    let u1 = entities[0].downcast::<User>().unwrap();
    let u2 = entities[1].downcast::<User>().unwrap();
    assert!(Rc::ptr_eq(&u1.borrow().friends[0], &u2));
}

#[test]
fn test_plural_linkages_keep_encounter_order() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "users",
            "id": 1,
            "relationships": {
                "friends": {
                    "data": [
                        {"type": "users", "id": 3},
                        {"type": "users", "id": 4},
                        {"type": "users", "id": 99}
                    ]
                }
            }
        },
        "included": [
            {"type": "users", "id": 4},
            {"type": "users", "id": 3}
        ]
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    let u1 = entity.downcast::<User>().unwrap();
    // users/99 is not carried by the document and drops out; the rest keep
    // linkage order, not `included` order.
    let ids: Vec<i64> = u1
        .borrow()
        .friends
        .iter()
        .map(|f| f.borrow().id)
        .collect();
    assert_eq!(ids, [3, 4]);
}

#[test]
fn test_unknown_document_and_resource_members_are_ignored() {
    let codec = posts_codec();
    let document = json!({
        "meta": {"count": 1},
        "junk": true,
        "data": {
            "type": "posts",
            "id": 7,
            "attributes": {"title": "Hello"},
            "links": {"self": "https://example.com/posts/7"},
            "unknown": [1, 2, 3]
        }
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().title.as_deref(), Some("Hello"));
}

#[test]
fn test_unknown_relationships_are_ignored() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {
                "reviewer": {"data": {"type": "users", "id": 9}}
            }
        },
        "included": [{"type": "users", "id": 9}]
    });

    let entity = codec.deserialize_entity(&document).unwrap();
    assert!(entity.borrow::<Post>().unwrap().owner.is_none());
}

#[test]
fn test_string_and_numeric_ids_share_identity() {
    let codec = blog_codec();
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": {"type": "users", "id": "9"}}}
        },
        "included": [
            {"type": "users", "id": 9, "attributes": {"name": "A"}}
        ]
    });

    // The linkage carries "9", the included resource 9; they are the same
    // identity.
    let entity = codec.deserialize_entity(&document).unwrap();
    let post = entity.borrow::<Post>().unwrap();
    assert_eq!(
        post.owner.as_ref().unwrap().borrow().name.as_deref(),
        Some("A")
    );
}
