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

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::error::Error;

/// A shared, mutable, type-erased handle to a domain entity.
///
/// `EntityRef` is the unit the codec moves around: contracts create them,
/// accessors read and write through them, and materialization hands back
/// clones of the same handle for resources that share an identity. Cloning an
/// `EntityRef` clones the handle, not the entity; two clones observe each
/// other's writes.
///
/// The payload is an `Rc<RefCell<T>>` erased to `Rc<dyn Any>` with the domain
/// `TypeId` of `T` recorded alongside, so contract resolution by runtime type
/// stays a plain map lookup.
///
/// # Examples
///
/// ```rust
/// use japi_core::entity::EntityRef;
///
/// struct Post {
///     title: String,
/// }
///
/// let entity = EntityRef::new(Post { title: "Hello".to_string() });
/// let other = entity.clone();
/// other.borrow_mut::<Post>().unwrap().title = "Updated".to_string();
/// assert_eq!(entity.borrow::<Post>().unwrap().title, "Updated");
/// assert!(entity.ptr_eq(&other));
/// ```
#[derive(Clone)]
pub struct EntityRef {
    inner: Rc<dyn Any>,
    type_id: TypeId,
}

impl EntityRef {
    /// Wraps a fresh domain value into a shared handle.
    pub fn new<T: 'static>(value: T) -> Self {
        EntityRef {
            inner: Rc::new(RefCell::new(value)),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Wraps an already-shared domain value without copying it.
    pub fn from_rc<T: 'static>(rc: Rc<RefCell<T>>) -> Self {
        let inner: Rc<dyn Any> = rc;
        EntityRef {
            inner,
            type_id: TypeId::of::<T>(),
        }
    }

    /// The domain `TypeId` the handle was created with; the key for contract
    /// resolution.
    #[inline(always)]
    pub fn runtime_type(&self) -> TypeId {
        self.type_id
    }

    /// Recovers the typed shared pointer.
    ///
    /// # Errors
    ///
    /// Errors if the handle does not hold a `T`.
    pub fn downcast<T: 'static>(&self) -> Result<Rc<RefCell<T>>, Error> {
        self.inner.clone().downcast::<RefCell<T>>().map_err(|_| {
            Error::type_error(format!(
                "entity is not a {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Immutably borrows the underlying entity.
    ///
    /// # Errors
    ///
    /// Errors if the handle does not hold a `T`, or if the entity is already
    /// mutably borrowed (accessors must not re-enter the codec).
    pub fn borrow<T: 'static>(&self) -> Result<Ref<'_, T>, Error> {
        let cell = self.inner.downcast_ref::<RefCell<T>>().ok_or_else(|| {
            Error::type_error(format!(
                "entity is not a {}",
                std::any::type_name::<T>()
            ))
        })?;
        cell.try_borrow()
            .map_err(|_| Error::invalid_argument("entity is already mutably borrowed"))
    }

    /// Mutably borrows the underlying entity.
    ///
    /// # Errors
    ///
    /// Errors if the handle does not hold a `T`, or if the entity is borrowed
    /// elsewhere.
    pub fn borrow_mut<T: 'static>(&self) -> Result<RefMut<'_, T>, Error> {
        let cell = self.inner.downcast_ref::<RefCell<T>>().ok_or_else(|| {
            Error::type_error(format!(
                "entity is not a {}",
                std::any::type_name::<T>()
            ))
        })?;
        cell.try_borrow_mut()
            .map_err(|_| Error::invalid_argument("entity is already borrowed"))
    }

    /// Object identity: true if both handles point at the same entity.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &EntityRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}
