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

use super::group::{DEFAULT_GROUP_TYPE, Group, GroupIndex, GroupPayload};
use crate::FleetError;

/// The default delimiter used by [`GroupTree::group_path`].
pub const DEFAULT_PATH_DELIMITER: &str = "/";

/// The group hierarchy of one datacenter, materialized from a single
/// [`GroupPayload`].
///
/// Groups live in an arena; the root is always at the first position.
///
/// # Example
///
/// ## Resolve a group by name and parent and print its path:
///
/// ```rust
/// use clc_fleet::{GroupPayload, GroupTree};
///
/// let payload = GroupPayload::from_json(r#"{
///     "id": "root", "name": "UC1 Hardware", "type": "default",
///     "groups": [{
///         "id": "prod", "name": "Production", "type": "default",
///         "groups": [{"id": "web", "name": "Web", "type": "default"}]
///     }]
/// }"#).unwrap();
///
/// let tree = GroupTree::build(&payload);
/// let web = tree.find_group("Web", Some("Production")).unwrap().unwrap();
/// assert_eq!(tree.path(web), "UC1 Hardware/Production/Web");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTree {
    groups: Vec<Group>,
}

impl GroupTree {
    /// Builds the tree from the nested API document.
    ///
    /// The root is always kept. Below it, only children of type `default`
    /// are instantiated; any other child is dropped together with all of
    /// its descendants.
    #[must_use]
    pub fn build(payload: &GroupPayload) -> GroupTree {
        let mut tree = GroupTree { groups: Vec::new() };
        tree.walk_groups(None, payload);
        log::trace!("Built group tree with {} groups.", tree.groups.len());
        tree
    }

    fn walk_groups(&mut self, parent: Option<GroupIndex>, payload: &GroupPayload) -> GroupIndex {
        let index = GroupIndex(self.groups.len());
        self.groups.push(Group {
            id: payload.id.clone(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            group_type: payload.group_type.clone(),
            index,
            parent,
            children: Vec::new(),
        });

        for child_payload in &payload.groups {
            if child_payload.group_type != DEFAULT_GROUP_TYPE {
                continue;
            }
            let child = self.walk_groups(Some(index), child_payload);
            self.groups[index.0].children.push(child);
        }
        index
    }

    /// The root group of the datacenter.
    #[must_use]
    pub fn root(&self) -> &Group {
        &self.groups[0]
    }

    /// Returns the group at the given position, if it belongs to this tree.
    #[must_use]
    pub fn get(&self, index: GroupIndex) -> Option<&Group> {
        self.groups.get(index.0)
    }

    /// Returns the parent of a group, `None` for the root.
    #[must_use]
    pub fn parent(&self, group: &Group) -> Option<&Group> {
        group.parent.and_then(|parent| self.get(parent))
    }

    /// Iterates over the children of a group, in API order.
    pub fn children<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Group> + 'a {
        group.children.iter().filter_map(|child| self.get(*child))
    }

    /// Number of groups in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// A tree always holds at least its root, so this is never `true`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over all groups in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Searches the whole tree for the group with the given name,
    /// optionally only below a parent with the given name.
    ///
    /// All matches are collected so that ambiguity is detected instead of
    /// being resolved by the first hit.
    ///
    /// ## Arguments
    ///
    /// - `group_name`: The name of the group;
    /// - `parent_name`: The optional name of the direct parent. The root
    ///   never matches when a parent name is given.
    ///
    /// ## Returns
    ///
    /// - `Some(group)` if exactly one group matches, `None` if none does.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`AmbiguousGroupError`](FleetError::AmbiguousGroupError) if more than one group matches.
    pub fn find_group(
        &self,
        group_name: &str,
        parent_name: Option<&str>,
    ) -> Result<Option<&Group>, FleetError> {
        let mut matches = Vec::new();
        self.find_group_recursive(self.root(), group_name, parent_name, &mut matches);

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            count => {
                let ids: Vec<String> = matches.iter().map(|group| group.id.clone()).collect();
                log::error!(
                    "Found {count} groups named '{group_name}' (parent: {parent_name:?}): {}",
                    ids.join(", ")
                );
                Err(FleetError::AmbiguousGroupError {
                    count,
                    name: group_name.to_owned(),
                    parent: parent_name.map(ToOwned::to_owned),
                    ids,
                })
            }
        }
    }

    fn find_group_recursive<'a>(
        &'a self,
        search_group: &'a Group,
        group_name: &str,
        parent_name: Option<&str>,
        matches: &mut Vec<&'a Group>,
    ) {
        if search_group.name == group_name {
            let parent_matches = match parent_name {
                None => true,
                Some(parent_name) => self
                    .parent(search_group)
                    .is_some_and(|parent| parent.name == parent_name),
            };
            if parent_matches {
                matches.push(search_group);
            }
        }
        for child in self.children(search_group) {
            self.find_group_recursive(child, group_name, parent_name, matches);
        }
    }

    /// Reconstructs the path of a group from the root down to the group.
    ///
    /// ## Arguments
    ///
    /// - `group`: The group, which must belong to this tree;
    /// - `by_id`: Use group ids instead of names;
    /// - `delimiter`: The string placed between path elements.
    #[must_use]
    pub fn group_path(&self, group: &Group, by_id: bool, delimiter: &str) -> String {
        let mut path_elements = Vec::new();
        let mut current = Some(group);
        while let Some(group) = current {
            path_elements.push(if by_id {
                group.id.as_str()
            } else {
                group.name.as_str()
            });
            current = self.parent(group);
        }
        path_elements.reverse();
        path_elements.join(delimiter)
    }

    /// The name path of a group joined with [`DEFAULT_PATH_DELIMITER`].
    #[must_use]
    pub fn path(&self, group: &Group) -> String {
        self.group_path(group, false, DEFAULT_PATH_DELIMITER)
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
pub fn generate_test_group_payload() -> GroupPayload {
    fn group(id: &str, name: &str, group_type: &str, groups: Vec<GroupPayload>) -> GroupPayload {
        GroupPayload {
            id: id.to_owned(),
            name: name.to_owned(),
            description: None,
            group_type: group_type.to_owned(),
            groups,
        }
    }

    // UC1 Hardware
    // ├── Default Group
    // ├── Production
    // │   ├── Web
    // │   └── Db
    // ├── Staging
    // │   └── Web
    // └── Archive (archive)
    //     └── Web
    group(
        "root",
        "UC1 Hardware",
        "default",
        vec![
            group("default-grp", "Default Group", "default", vec![]),
            group(
                "prod",
                "Production",
                "default",
                vec![
                    group("prod-web", "Web", "default", vec![]),
                    group("prod-db", "Db", "default", vec![]),
                ],
            ),
            group(
                "staging",
                "Staging",
                "default",
                vec![group("staging-web", "Web", "default", vec![])],
            ),
            group(
                "archive",
                "Archive",
                "archive",
                vec![group("archive-web", "Web", "default", vec![])],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::{GroupTree, generate_test_group_payload};
    use crate::FleetError;

    #[test]
    fn utest_build_prunes_non_default_groups() {
        let tree = GroupTree::build(&generate_test_group_payload());
        assert_eq!(tree.len(), 7);
        assert!(!tree.is_empty());
        assert!(tree.iter().all(|group| group.id != "archive"));
        assert!(tree.iter().all(|group| group.id != "archive-web"));

        let root = tree.root();
        assert_eq!(root.name, "UC1 Hardware");
        assert!(tree.parent(root).is_none());
        let children: Vec<&str> = tree.children(root).map(|g| g.name.as_str()).collect();
        assert_eq!(children, vec!["Default Group", "Production", "Staging"]);
    }

    #[test]
    fn utest_parent_back_references() {
        let tree = GroupTree::build(&generate_test_group_payload());
        let db = tree.iter().find(|group| group.id == "prod-db").unwrap();
        let parent = tree.parent(db).unwrap();
        assert_eq!(parent.id, "prod");
        assert_eq!(db.parent_index(), Some(parent.index()));
        assert!(parent.child_indices().contains(&db.index()));
        assert_eq!(tree.get(db.index()), Some(db));
    }

    #[test]
    fn utest_find_unique_group() {
        let tree = GroupTree::build(&generate_test_group_payload());
        let group = tree.find_group("Db", None).unwrap().unwrap();
        assert_eq!(group.id, "prod-db");
    }

    #[test]
    fn utest_find_group_not_found() {
        let tree = GroupTree::build(&generate_test_group_payload());
        assert!(tree.find_group("Cache", None).unwrap().is_none());
        assert!(tree.find_group("Db", Some("Staging")).unwrap().is_none());
    }

    #[test]
    fn utest_find_group_ambiguous() {
        let tree = GroupTree::build(&generate_test_group_payload());
        match tree.find_group("Web", None) {
            Err(FleetError::AmbiguousGroupError {
                count,
                name,
                parent,
                ids,
            }) => {
                assert_eq!(count, 2);
                assert_eq!(name, "Web");
                assert_eq!(parent, None);
                assert_eq!(ids, vec!["prod-web".to_owned(), "staging-web".to_owned()]);
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn utest_find_group_disambiguated_by_parent() {
        let tree = GroupTree::build(&generate_test_group_payload());
        let group = tree.find_group("Web", Some("Staging")).unwrap().unwrap();
        assert_eq!(group.id, "staging-web");
    }

    #[test]
    fn utest_root_never_matches_parent_filter() {
        let tree = GroupTree::build(&generate_test_group_payload());
        assert!(tree.find_group("UC1 Hardware", None).unwrap().is_some());
        assert!(
            tree.find_group("UC1 Hardware", Some("UC1 Hardware"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn utest_group_path() {
        let tree = GroupTree::build(&generate_test_group_payload());
        let web = tree.find_group("Web", Some("Production")).unwrap().unwrap();
        assert_eq!(tree.path(web), "UC1 Hardware/Production/Web");
        assert_eq!(tree.group_path(web, true, "."), "root.prod.prod-web");
        assert_eq!(tree.path(tree.root()), "UC1 Hardware");

        let path = tree.path(web);
        let names: Vec<&str> = path.split('/').collect();
        assert_eq!(names, vec!["UC1 Hardware", "Production", "Web"]);
    }
}
