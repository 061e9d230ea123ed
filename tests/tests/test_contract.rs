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

//! Tests for the contract model: resolver lookups, field ordering and the
//! accessor gating rules.

use std::any::TypeId;

use japi::{
    Contract, DeclaredType, EntityRef, Error, Field, FieldAccessor, FieldOptions, FieldValue,
    Japi, RelationshipBuilder, ScalarKind,
};
use japi_tests::models::{posts_codec, users_contract, Post, User};
use serde_json::json;

#[test]
fn test_resolver_lookups() {
    let codec = posts_codec();
    let resolver = codec.resolver();

    assert!(resolver.try_resolve_name("posts").is_some());
    assert!(resolver.try_resolve_name("movies").is_none());
    assert!(resolver.try_resolve_type(TypeId::of::<Post>()).is_some());
    assert!(resolver.try_resolve_type(TypeId::of::<User>()).is_none());

    let contract = resolver.try_resolve_name("posts").unwrap();
    assert_eq!(contract.name(), "posts");
    assert_eq!(contract.runtime_type(), TypeId::of::<Post>());
}

#[test]
fn test_fields_keep_declaration_order() {
    let codec = posts_codec();
    let contract = codec.resolver().try_resolve_name("posts").unwrap();
    let names: Vec<&str> = contract.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["id", "title"]);
    assert_eq!(contract.id_field().unwrap().name(), "id");
}

#[test]
fn test_factory_produces_fresh_instances() {
    let contract = users_contract();
    let a = contract.create_instance();
    let b = contract.create_instance();
    assert!(!a.ptr_eq(&b));
    assert_eq!(a.borrow::<User>().unwrap().id, 0);
}

#[test]
fn test_write_only_field_is_emitted_but_never_written() {
    let codec = Japi::default().register(
        Contract::builder::<Post>("posts")
            .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
            .field(Field::new(
                "secret",
                DeclaredType::Scalar(ScalarKind::String),
                FieldOptions::CAN_SERIALIZE,
                FieldAccessor::from_fns(
                    Box::new(|_| Ok(FieldValue::Scalar(Box::new("classified".to_string())))),
                    Box::new(|_, _| Err(Error::unknown("set must never run"))),
                ),
            ))
            .build(),
    );

    let document = codec
        .serialize_entity(&EntityRef::new(Post::default()))
        .unwrap();
    assert_eq!(document["data"]["attributes"]["secret"], "classified");

    // The incoming attribute is ignored because the field is not writable;
    // a `set` call would surface the error above.
    let document = json!({
        "data": {"type": "posts", "id": 1, "attributes": {"secret": "changed"}}
    });
    assert!(codec.deserialize_entity(&document).is_ok());
}

#[test]
fn test_read_only_field_is_written_but_never_emitted() {
    let codec = Japi::default().register(
        Contract::builder::<Post>("posts")
            .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
            .field(Field::new(
                "token",
                DeclaredType::Scalar(ScalarKind::String),
                FieldOptions::CAN_DESERIALIZE,
                FieldAccessor::from_fns(
                    Box::new(|_| Err(Error::unknown("get must never run"))),
                    Box::new(|entity, value| {
                        let FieldValue::Scalar(raw) = value else {
                            return Err(Error::unknown("expected a scalar"));
                        };
                        let s = *raw
                            .downcast::<String>()
                            .map_err(|_| Error::unknown("not a string"))?;
                        entity.borrow_mut::<Post>()?.title = Some(s);
                        Ok(())
                    }),
                ),
            ))
            .build(),
    );

    // A `get` call during serialization would surface the error above.
    let document = codec
        .serialize_entity(&EntityRef::new(Post {
            id: 1,
            ..Post::default()
        }))
        .unwrap();
    assert!(document["data"].get("attributes").is_none());

    let document = json!({
        "data": {"type": "posts", "id": 1, "attributes": {"token": "abc"}}
    });
    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().title.as_deref(), Some("abc"));
}

#[test]
fn test_read_only_id_is_written_but_never_emitted() {
    let codec = Japi::default().register(
        Contract::builder::<Post>("posts")
            .field(Field::new(
                "id",
                DeclaredType::Scalar(ScalarKind::Int64),
                FieldOptions::ID | FieldOptions::CAN_DESERIALIZE,
                FieldAccessor::from_fns(
                    Box::new(|_| Err(Error::unknown("get must never run"))),
                    Box::new(|entity, value| {
                        let FieldValue::Scalar(raw) = value else {
                            return Err(Error::unknown("expected a scalar"));
                        };
                        let v = *raw
                            .downcast::<i64>()
                            .map_err(|_| Error::unknown("not an i64"))?;
                        entity.borrow_mut::<Post>()?.id = v;
                        Ok(())
                    }),
                ),
            ))
            .attribute(
                "title",
                ScalarKind::String,
                |p: &Post| p.title.clone(),
                |p, v| p.title = Some(v),
            )
            .build(),
    );

    // A `get` call during serialization would surface the error above; the
    // resource is emitted without an `id`.
    let document = codec
        .serialize_entity(&EntityRef::new(Post {
            id: 7,
            title: Some("Hello".to_string()),
            ..Post::default()
        }))
        .unwrap();
    assert!(document["data"].get("id").is_none());
    assert_eq!(document["data"]["attributes"]["title"], "Hello");

    // Still writable on the way in.
    let document = json!({"data": {"type": "posts", "id": 7}});
    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().id, 7);
}

#[test]
fn test_read_only_foreign_key_never_emits_linkage() {
    let codec = Japi::default().register(users_contract()).register(
        Contract::builder::<Post>("posts")
            .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
            .relationship(
                RelationshipBuilder::<Post, User>::belongs_to("owner")
                    .via_with(Field::new(
                        "ownerId",
                        DeclaredType::Scalar(ScalarKind::Int64),
                        FieldOptions::CAN_DESERIALIZE | FieldOptions::RELATIONSHIP,
                        FieldAccessor::scalar(
                            |p: &Post| p.owner_id,
                            |p, v| p.owner_id = Some(v),
                        ),
                    ))
                    .build(),
            )
            .build(),
    );

    // Not serializable: the relationship contributes nothing on the way out.
    let document = codec
        .serialize_entity(&EntityRef::new(Post {
            id: 1,
            owner_id: Some(9),
            ..Post::default()
        }))
        .unwrap();
    assert!(document["data"].get("relationships").is_none());

    // Still writable on the way in.
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "relationships": {"owner": {"data": {"type": "users", "id": 9}}}
        }
    });
    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().owner_id, Some(9));
}

#[test]
fn test_entity_ref_type_mismatches() {
    let entity = EntityRef::new(Post::default());
    assert!(matches!(
        entity.borrow::<User>().unwrap_err(),
        Error::TypeError(_)
    ));
    assert!(matches!(
        entity.downcast::<User>().unwrap_err(),
        Error::TypeError(_)
    ));
    assert!(entity.downcast::<Post>().is_ok());
}

#[test]
fn test_entity_ref_borrow_conflicts() {
    let entity = EntityRef::new(Post::default());
    let guard = entity.borrow_mut::<Post>().unwrap();
    assert!(matches!(
        entity.borrow::<Post>().unwrap_err(),
        Error::InvalidArgument(_)
    ));
    drop(guard);
    assert!(entity.borrow::<Post>().is_ok());
}

#[test]
fn test_relationship_backing_fields_are_not_attributes() {
    // `ownerId` is declared both as an attribute and as the relationship's
    // foreign key; the relationship wins and the attribute is suppressed in
    // both directions.
    let codec = Japi::default().register(users_contract()).register(
        Contract::builder::<Post>("posts")
            .id("id", ScalarKind::Int64, |p: &Post| Some(p.id), |p, v| p.id = v)
            .attribute(
                "ownerId",
                ScalarKind::Int64,
                |p: &Post| p.owner_id,
                |p, v| p.owner_id = Some(v),
            )
            .relationship(
                RelationshipBuilder::<Post, User>::belongs_to("owner")
                    .via(
                        "ownerId",
                        ScalarKind::Int64,
                        |p: &Post| p.owner_id,
                        |p, v| p.owner_id = Some(v),
                    )
                    .build(),
            )
            .build(),
    );

    let document = codec
        .serialize_entity(&EntityRef::new(Post {
            id: 1,
            owner_id: Some(9),
            ..Post::default()
        }))
        .unwrap();
    assert!(document["data"].get("attributes").is_none());
    assert_eq!(
        document["data"]["relationships"]["owner"]["data"],
        json!({"type": "users", "id": 9})
    );

    // On the way in the attribute form is ignored; only a relationship
    // linkage can write the foreign key.
    let document = json!({
        "data": {
            "type": "posts",
            "id": 1,
            "attributes": {"owner-id": 42}
        }
    });
    let entity = codec.deserialize_entity(&document).unwrap();
    assert_eq!(entity.borrow::<Post>().unwrap().owner_id, None);
}
