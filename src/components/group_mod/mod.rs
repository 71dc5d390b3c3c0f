// Copyright (c) 2025 Elektrobit Automotive GmbH
//
// This program and the accompanying materials are made available under the
// terms of the Apache License, Version 2.0 which is available at
// https://www.apache.org/licenses/LICENSE-2.0.
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations
// under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! This module contains the group hierarchy of a datacenter and the
//! resolver that turns human readable group names into group ids.
//!
//! # Example
//!
//! ## Show the id path of every group:
//!
//! ```rust
//! # use clc_fleet::{GroupPayload, GroupTree};
//! # let payload = GroupPayload::from_json(r#"{"id": "root", "name": "UC1 Hardware"}"#).unwrap();
//! let tree = GroupTree::build(&payload);
//! for group in tree.iter() {
//!     println!("{}", tree.group_path(group, true, "/"));
//! }
//! ```

mod group;
mod group_tree;

pub use group::{DEFAULT_GROUP_TYPE, Group, GroupIndex, GroupPayload};
pub use group_tree::{DEFAULT_PATH_DELIMITER, GroupTree};

#[cfg(test)]
pub use group_tree::generate_test_group_payload;
