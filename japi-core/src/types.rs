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

use std::ops::BitOr;

/// Bit set controlling how a contract field participates in the codec.
///
/// The default for a plain attribute is [`FieldOptions::DEFAULT`], i.e. the
/// field is both readable for wire output and writable during
/// materialization. The codec never invokes a field's `set` accessor unless
/// [`FieldOptions::CAN_DESERIALIZE`] is present, and never invokes `get` for
/// wire output unless [`FieldOptions::CAN_SERIALIZE`] is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldOptions(u8);

impl FieldOptions {
    pub const NONE: FieldOptions = FieldOptions(0);
    /// Marks the primary-key field; its value becomes the resource `id`.
    pub const ID: FieldOptions = FieldOptions(1);
    pub const CAN_SERIALIZE: FieldOptions = FieldOptions(1 << 1);
    pub const CAN_DESERIALIZE: FieldOptions = FieldOptions(1 << 2);
    /// Marks a field installed as the backing of a relationship.
    pub const RELATIONSHIP: FieldOptions = FieldOptions(1 << 3);
    /// `CAN_SERIALIZE | CAN_DESERIALIZE`.
    pub const DEFAULT: FieldOptions =
        FieldOptions(FieldOptions::CAN_SERIALIZE.0 | FieldOptions::CAN_DESERIALIZE.0);

    /// Returns true if all bits of `other` are present in `self`.
    #[inline(always)]
    pub const fn contains(self, other: FieldOptions) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub const fn is_id(self) -> bool {
        self.contains(FieldOptions::ID)
    }

    #[inline(always)]
    pub const fn can_serialize(self) -> bool {
        self.contains(FieldOptions::CAN_SERIALIZE)
    }

    #[inline(always)]
    pub const fn can_deserialize(self) -> bool {
        self.contains(FieldOptions::CAN_DESERIALIZE)
    }
}

impl BitOr for FieldOptions {
    type Output = FieldOptions;

    #[inline(always)]
    fn bitor(self, rhs: FieldOptions) -> FieldOptions {
        FieldOptions(self.0 | rhs.0)
    }
}

/// The scalar kinds the leaf-value codec understands.
///
/// Date and time kinds map onto the chrono types: [`ScalarKind::LocalDate`]
/// is a `chrono::NaiveDate`, [`ScalarKind::LocalDateTime`] a
/// `chrono::NaiveDateTime` and [`ScalarKind::Timestamp`] a
/// `chrono::DateTime<Utc>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    LocalDate,
    LocalDateTime,
    Timestamp,
}

/// The static type of a contract field's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclaredType {
    /// A leaf value handled by the scalar codec.
    Scalar(ScalarKind),
    /// A single related entity.
    Reference,
    /// A collection of related entities.
    ReferenceList,
}

/// The two relationship cardinalities: singular (zero-or-one) vs plural
/// (zero-or-more).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationshipKind {
    BelongsTo,
    HasMany,
}
