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

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if JAPI_PANIC_ON_ERROR environment variable is set at compile time.
/// Set JAPI_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("JAPI_PANIC_ON_ERROR").is_some();

/// Error type for japi serialization and deserialization operations.
///
/// # Always Use Static Constructor Functions
///
/// **DO NOT** construct error variants directly using the enum syntax.
/// **ALWAYS** use the provided static constructor functions instead. The
/// static functions provide automatic conversion via `Into<Cow<'static, str>>`
/// and participate in the `JAPI_PANIC_ON_ERROR` debug facility.
///
/// ```rust
/// use japi_core::error::Error;
///
/// // ✅ CORRECT: Use static functions
/// let err = Error::unknown_type("no contract registered for `posts`");
/// let err = Error::shape_mismatch(format!("`data` must be an array, got {}", "object"));
///
/// // ❌ WRONG: Do not construct directly
/// // let err = Error::UnknownType("no contract registered for `posts`".into());
/// ```
///
/// ## Debug Mode: JAPI_PANIC_ON_ERROR
///
/// For easier debugging, set the `JAPI_PANIC_ON_ERROR` environment variable at
/// compile time to make the program panic at the exact location where an error
/// is created. Combine with `RUST_BACKTRACE=1` to get a full stack trace
/// showing where the error originated.
///
/// ```bash
/// RUST_BACKTRACE=1 JAPI_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No contract is registered for a wire type name or a runtime type.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_type`] instead.
    #[error("unknown resource type: {0}")]
    UnknownType(Cow<'static, str>),

    /// A document or relationship member had the wrong JSON shape, e.g. an
    /// array where a single object was required.
    ///
    /// Do not construct this variant directly; use [`Error::shape_mismatch`] instead.
    #[error("{0}")]
    ShapeMismatch(Cow<'static, str>),

    /// A plural relationship's value does not support iteration.
    ///
    /// Do not construct this variant directly; use [`Error::non_iterable`] instead.
    #[error("{0}")]
    NonIterableHasMany(Cow<'static, str>),

    /// A plural relationship's target cannot be materialized as a collection.
    ///
    /// Do not construct this variant directly; use [`Error::unconstructible_collection`] instead.
    #[error("{0}")]
    UnconstructibleCollection(Cow<'static, str>),

    /// An entry-point argument is unusable, e.g. an entity that is already
    /// mutably borrowed or a template referencing a missing field.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_argument`] instead.
    #[error("{0}")]
    InvalidArgument(Cow<'static, str>),

    /// An accessor or value downcast saw a value of the wrong runtime type.
    ///
    /// Do not construct this variant directly; use [`Error::type_error`] instead.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// Invalid or uncoercible scalar data encountered.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// The relationship graph walk exceeded the configured depth bound.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceeded`] instead.
    #[error("{0}")]
    DepthExceeded(Cow<'static, str>),

    /// Generic unknown error.
    ///
    /// Do not construct this variant directly; use [`Error::unknown`] instead.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

macro_rules! static_constructor {
    ($(#[$doc:meta])* $name:ident => $variant:ident) => {
        $(#[$doc])*
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("JAPI_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    static_constructor! {
        /// Creates a new [`Error::UnknownType`] from a string or static message.
        ///
        /// # Example
        /// ```
        /// use japi_core::error::Error;
        ///
        /// let err = Error::unknown_type("no contract registered for `posts`");
        /// ```
        unknown_type => UnknownType
    }

    static_constructor! {
        /// Creates a new [`Error::ShapeMismatch`] from a string or static message.
        shape_mismatch => ShapeMismatch
    }

    static_constructor! {
        /// Creates a new [`Error::NonIterableHasMany`] from a string or static message.
        non_iterable => NonIterableHasMany
    }

    static_constructor! {
        /// Creates a new [`Error::UnconstructibleCollection`] from a string or static message.
        unconstructible_collection => UnconstructibleCollection
    }

    static_constructor! {
        /// Creates a new [`Error::InvalidArgument`] from a string or static message.
        invalid_argument => InvalidArgument
    }

    static_constructor! {
        /// Creates a new [`Error::TypeError`] from a string or static message.
        ///
        /// # Example
        /// ```
        /// use japi_core::error::Error;
        ///
        /// let err = Error::type_error(format!("value is not a {}", "String"));
        /// ```
        type_error => TypeError
    }

    static_constructor! {
        /// Creates a new [`Error::InvalidData`] from a string or static message.
        invalid_data => InvalidData
    }

    static_constructor! {
        /// Creates a new [`Error::DepthExceeded`] from a string or static message.
        depth_exceeded => DepthExceeded
    }

    static_constructor! {
        /// Creates a new [`Error::Unknown`] from a string or static message.
        ///
        /// This function is a convenient way to produce an error message from a
        /// literal, `String`, or any type convertible into a [`Cow<'static, str>`].
        unknown => Unknown
    }

    /// Enhances a [`Error::TypeError`] with additional type name information.
    ///
    /// If the error is a `TypeError`, appends the type name to the message.
    /// Otherwise, returns the error unchanged.
    #[inline(never)]
    pub fn enhance_type_error<T: ?Sized + 'static>(err: Error) -> Error {
        if let Error::TypeError(s) = err {
            let mut msg = s.to_string();
            msg.push_str(" (type: ");
            msg.push_str(std::any::type_name::<T>());
            msg.push(')');
            Error::type_error(msg)
        } else {
            err
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use japi_core::ensure;
/// use japi_core::error::Error;
///
/// fn check_depth(depth: u32) -> Result<(), Error> {
///     ensure!(depth < 64, Error::depth_exceeded("nesting too deep"));
///     ensure!(depth < 128, "depth {} out of range", depth);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`enum@Error`].
///
/// # Examples
/// ```
/// use japi_core::bail;
/// use japi_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}
