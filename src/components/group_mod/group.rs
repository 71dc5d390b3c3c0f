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

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FleetError;

/// The group type that is kept when the tree is built. Groups of any other
/// type (archive, billing placeholders, ...) are pruned with their subtree.
pub const DEFAULT_GROUP_TYPE: &str = "default";

/// Position of a [Group] inside its [`GroupTree`](super::GroupTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(pub(crate) usize);

/// A node of the group hierarchy of a datacenter.
///
/// The parent is a non-owning back reference expressed as a
/// [`GroupIndex`]; children are owned by the tree and kept in API order.
///
/// The indices only have a meaning inside the [`GroupTree`](super::GroupTree)
/// the group was taken from. A group handed out on its own, e.g. by
/// [`Fleet::resolve_group`](crate::Fleet::resolve_group), carries valid
/// `id`, `name`, `description` and `group_type`; to walk its parent or
/// children look it up again in a tree of the same datacenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// The group id.
    pub id: String,
    /// The group name.
    pub name: String,
    /// The group description.
    pub description: Option<String>,
    /// The group type, `default` for every group kept in a tree except
    /// possibly the root.
    pub group_type: String,
    pub(crate) index: GroupIndex,
    pub(crate) parent: Option<GroupIndex>,
    pub(crate) children: Vec<GroupIndex>,
}

impl Group {
    /// Position of the group in its tree.
    #[must_use]
    pub fn index(&self) -> GroupIndex {
        self.index
    }

    /// Position of the parent group, `None` for the root.
    #[must_use]
    pub fn parent_index(&self) -> Option<GroupIndex> {
        self.parent
    }

    /// Positions of the children, in API order.
    #[must_use]
    pub fn child_indices(&self) -> &[GroupIndex] {
        &self.children
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The nested group document returned by the cloud for a group, including
/// all of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    /// The group id.
    pub id: String,
    /// The group name.
    pub name: String,
    /// The group description.
    #[serde(default)]
    pub description: Option<String>,
    /// The group type.
    #[serde(rename = "type", default = "default_group_type")]
    pub group_type: String,
    /// The nested child groups.
    #[serde(default)]
    pub groups: Vec<GroupPayload>,
}

fn default_group_type() -> String {
    DEFAULT_GROUP_TYPE.to_owned()
}

impl GroupPayload {
    /// Parses a group document from its JSON representation.
    ///
    /// ## Errors
    ///
    /// Returns an [`FleetError`]::[`ApiError`](FleetError::ApiError) if the
    /// document is not a valid group.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<GroupPayload, FleetError> {
        serde_json::from_str(json.as_ref())
            .map_err(|err| FleetError::ApiError(format!("Invalid group payload: {err}")))
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
