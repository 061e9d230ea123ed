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

//! Field accessors: the capability a contract field owns for reading and
//! writing a named member of an opaque entity.
//!
//! The codec performs no dynamic member resolution at runtime. Typed closures
//! are installed at contract-build time and erased into a [`FieldAccessor`]
//! pair; values cross the boundary as [`FieldValue`]s.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::entity::EntityRef;
use crate::error::Error;

/// The erased value protocol between accessors and the codec.
pub enum FieldValue {
    /// An absent value. Reading an `Option::None` field yields this; writing
    /// it is a no-op.
    Null,
    /// A leaf value for the scalar codec.
    Scalar(Box<dyn Any>),
    /// A single related entity.
    Reference(EntityRef),
    /// A collection of related entities.
    References(Vec<EntityRef>),
}

impl FieldValue {
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Scalar(_) => f.write_str("Scalar(..)"),
            FieldValue::Reference(e) => f.debug_tuple("Reference").field(e).finish(),
            FieldValue::References(e) => f.debug_tuple("References").field(&e.len()).finish(),
        }
    }
}

type GetFn = Box<dyn Fn(&EntityRef) -> Result<FieldValue, Error>>;
type SetFn = Box<dyn Fn(&EntityRef, FieldValue) -> Result<(), Error>>;

/// A read/write capability over one named field of an entity.
///
/// Constructed from typed closures by the builder helpers below; the raw
/// [`FieldAccessor::from_fns`] form admits hand-written erased accessors.
pub struct FieldAccessor {
    get: GetFn,
    set: SetFn,
}

impl FieldAccessor {
    /// Builds an accessor from already-erased closures.
    pub fn from_fns(get: GetFn, set: SetFn) -> Self {
        FieldAccessor { get, set }
    }

    /// Builds an accessor over a scalar field of `T`.
    ///
    /// `get` returns `None` for an absent value; `set` receives the
    /// deserialized scalar.
    pub fn scalar<T, V>(
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self
    where
        T: 'static,
        V: 'static,
    {
        FieldAccessor {
            get: Box::new(move |entity| {
                let guard = entity.borrow::<T>()?;
                Ok(match get(&guard) {
                    Some(v) => FieldValue::Scalar(Box::new(v)),
                    None => FieldValue::Null,
                })
            }),
            set: Box::new(move |entity, value| match value {
                FieldValue::Scalar(raw) => {
                    let v = *raw.downcast::<V>().map_err(|_| {
                        Error::type_error(format!(
                            "field value is not a {}",
                            std::any::type_name::<V>()
                        ))
                    })?;
                    let mut guard = entity.borrow_mut::<T>()?;
                    set(&mut guard, v);
                    Ok(())
                }
                FieldValue::Null => Ok(()),
                other => Err(Error::type_error(format!(
                    "scalar field cannot accept {other:?}"
                ))),
            }),
        }
    }

    /// Builds an accessor over a singular navigation field of `T` pointing at
    /// a peer entity `P`.
    pub fn reference<T, P>(
        get: impl Fn(&T) -> Option<Rc<RefCell<P>>> + 'static,
        set: impl Fn(&mut T, Rc<RefCell<P>>) + 'static,
    ) -> Self
    where
        T: 'static,
        P: 'static,
    {
        FieldAccessor {
            get: Box::new(move |entity| {
                let guard = entity.borrow::<T>()?;
                Ok(match get(&guard) {
                    Some(rc) => FieldValue::Reference(EntityRef::from_rc(rc)),
                    None => FieldValue::Null,
                })
            }),
            set: Box::new(move |entity, value| match value {
                FieldValue::Reference(related) => {
                    let rc = related.downcast::<P>()?;
                    let mut guard = entity.borrow_mut::<T>()?;
                    set(&mut guard, rc);
                    Ok(())
                }
                FieldValue::Null => Ok(()),
                other => Err(Error::type_error(format!(
                    "singular navigation field cannot accept {other:?}"
                ))),
            }),
        }
    }

    /// Builds an accessor over a plural navigation field of `T` pointing at
    /// peer entities `P`.
    pub fn reference_list<T, P>(
        get: impl Fn(&T) -> Option<Vec<Rc<RefCell<P>>>> + 'static,
        set: impl Fn(&mut T, Vec<Rc<RefCell<P>>>) + 'static,
    ) -> Self
    where
        T: 'static,
        P: 'static,
    {
        FieldAccessor {
            get: Box::new(move |entity| {
                let guard = entity.borrow::<T>()?;
                Ok(match get(&guard) {
                    Some(list) => {
                        FieldValue::References(list.into_iter().map(EntityRef::from_rc).collect())
                    }
                    None => FieldValue::Null,
                })
            }),
            set: Box::new(move |entity, value| match value {
                FieldValue::References(related) => {
                    let list = related
                        .iter()
                        .map(EntityRef::downcast::<P>)
                        .collect::<Result<Vec<_>, Error>>()?;
                    let mut guard = entity.borrow_mut::<T>()?;
                    set(&mut guard, list);
                    Ok(())
                }
                FieldValue::Null => Ok(()),
                other => Err(Error::type_error(format!(
                    "plural navigation field cannot accept {other:?}"
                ))),
            }),
        }
    }

    /// Reads the field from `entity`.
    #[inline(always)]
    pub fn get(&self, entity: &EntityRef) -> Result<FieldValue, Error> {
        (self.get)(entity)
    }

    /// Writes `value` into the field of `entity`.
    #[inline(always)]
    pub fn set(&self, entity: &EntityRef, value: FieldValue) -> Result<(), Error> {
        (self.set)(entity, value)
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccessor")
    }
}
