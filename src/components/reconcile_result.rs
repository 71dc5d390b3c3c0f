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

use serde::Serialize;
use std::fmt;

use crate::components::operation::OperationHandle;
use crate::components::server_mod::Server;

/// The outcome of one reconciliation pass, ready to be handed back to the
/// orchestrator.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    /// `true` if at least one mutating operation was dispatched.
    pub changed: bool,
    /// Server snapshots, in a deterministic order.
    pub servers: Vec<Server>,
    /// The ids of `servers`, in the same order.
    pub server_ids: Vec<String>,
    /// Ids of the servers that were created, terminated or toggled.
    pub affected_server_ids: Vec<String>,
    /// Operations still in flight because the caller did not wait.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pending_operations: Vec<OperationHandle>,
}

impl ReconcileResult {
    /// A result that reports no change for the given servers.
    #[must_use]
    pub fn unchanged(servers: Vec<Server>) -> ReconcileResult {
        ReconcileResult::new(false, servers, Vec::new())
    }

    /// Creates a new `ReconcileResult`; `server_ids` is derived from
    /// `servers`.
    #[must_use]
    pub fn new(
        changed: bool,
        servers: Vec<Server>,
        affected_server_ids: Vec<String>,
    ) -> ReconcileResult {
        let server_ids = servers.iter().map(|server| server.id.clone()).collect();
        ReconcileResult {
            changed,
            servers,
            server_ids,
            affected_server_ids,
            pending_operations: Vec::new(),
        }
    }

    /// Attaches the handles of operations that were not awaited.
    #[must_use]
    pub fn with_pending_operations(mut self, handles: Vec<OperationHandle>) -> ReconcileResult {
        self.pending_operations = handles;
        self
    }

    /// Serializes the result to the JSON document returned to the caller.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl fmt::Display for ReconcileResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "changed: {}, servers: [{}]",
            self.changed,
            self.server_ids.join(", ")
        )
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
