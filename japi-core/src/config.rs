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

/// Configuration for the japi codec.
///
/// This struct holds the options that control how documents are produced and
/// consumed. It is shared between the main [`Japi`](crate::japi::Japi)
/// instance and the per-document writer/reader to ensure consistent behavior.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum depth of the related-resource walk and of recursive
    /// materialization. Identified resources are deduplicated by the visited
    /// set, so well-formed graphs never approach this bound; it converts
    /// runaway graphs (e.g. cycles of resources that carry no `id`) into an
    /// error instead of stack exhaustion.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config { max_depth: 64 }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the maximum graph-walk depth.
    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
