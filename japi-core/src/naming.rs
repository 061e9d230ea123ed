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

//! Name transforms between the in-memory camelCase form and the on-wire
//! dash-cased form.
//!
//! `camelToDashed` lowers the leading character and, at every lower-to-upper
//! transition, interposes a `-` and lowers the upper character. The inverse
//! splits on `-` and capitalizes each segment past the first. Matching wire
//! names against a contract's field list is case-insensitive on the final
//! camelCase form.

/// Converts an in-memory `camelCase` name into its on-wire dash-cased form.
///
/// ```
/// use japi_core::naming::camel_to_dashed;
///
/// assert_eq!(camel_to_dashed("createdAt"), "created-at");
/// assert_eq!(camel_to_dashed("Title"), "title");
/// ```
pub fn camel_to_dashed(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_lowercase());
            prev_lower = c.is_lowercase();
        } else if c.is_uppercase() && prev_lower {
            out.push('-');
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase();
            out.push(c);
        }
    }
    out
}

/// Converts an on-wire dash-cased name back into `camelCase`.
///
/// ```
/// use japi_core::naming::dashed_to_camel;
///
/// assert_eq!(dashed_to_camel("created-at"), "createdAt");
/// assert_eq!(dashed_to_camel("title"), "title");
/// ```
pub fn dashed_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i == 0 || segment.is_empty() {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
