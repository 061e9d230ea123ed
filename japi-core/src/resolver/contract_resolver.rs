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

//! The dispatch table of the codec: bidirectional mapping between runtime
//! types and contracts, plus the wire-name index.
//!
//! The resolver is populated once during configuration and read-only
//! afterwards; both codec directions share it across documents.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::contract::Contract;
use crate::entity::EntityRef;
use crate::error::Error;

/// Maps runtime types and wire names to contracts.
#[derive(Default)]
pub struct ContractResolver {
    by_type: HashMap<TypeId, Rc<Contract>>,
    by_name: HashMap<String, Rc<Contract>>,
}

impl ContractResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contract under both its runtime type and its wire name.
    /// Registering a second contract for the same type or name replaces the
    /// earlier one.
    pub fn register(&mut self, contract: Contract) {
        let contract = Rc::new(contract);
        self.by_type
            .insert(contract.runtime_type(), contract.clone());
        self.by_name
            .insert(contract.name().to_owned(), contract);
    }

    /// Pure lookup by runtime type.
    #[inline(always)]
    pub fn try_resolve_type(&self, runtime_type: TypeId) -> Option<&Rc<Contract>> {
        self.by_type.get(&runtime_type)
    }

    /// Pure lookup by wire name.
    #[inline(always)]
    pub fn try_resolve_name(&self, name: &str) -> Option<&Rc<Contract>> {
        self.by_name.get(name)
    }

    pub(crate) fn resolve_type(&self, runtime_type: TypeId) -> Result<&Rc<Contract>, Error> {
        self.try_resolve_type(runtime_type)
            .ok_or_else(|| Error::unknown_type("no contract registered for runtime type"))
    }

    pub(crate) fn resolve_entity(&self, entity: &EntityRef) -> Result<&Rc<Contract>, Error> {
        self.resolve_type(entity.runtime_type())
    }

    pub(crate) fn resolve_name(&self, name: &str) -> Result<&Rc<Contract>, Error> {
        self.try_resolve_name(name)
            .ok_or_else(|| Error::unknown_type(format!("no contract registered for `{name}`")))
    }
}

impl fmt::Debug for ContractResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ContractResolver")
            .field("contracts", &names)
            .finish()
    }
}
