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

//! Handles and statuses of the long-running operations the cloud executes
//! on behalf of the library (server creation, deletion, power changes and
//! public IP changes).

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kind of action an [`OperationHandle`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    /// A server is being provisioned.
    Create,
    /// A server is being deleted.
    Terminate,
    /// A server is being powered on.
    PowerOn,
    /// A server is being powered off.
    PowerOff,
    /// A public IP is being attached to a server.
    AddPublicIp,
    /// A public IP is being removed from a server.
    RemovePublicIp,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_str = match self {
            OperationKind::Create => "create",
            OperationKind::Terminate => "terminate",
            OperationKind::PowerOn => "power on",
            OperationKind::PowerOff => "power off",
            OperationKind::AddPublicIp => "add public IP",
            OperationKind::RemovePublicIp => "remove public IP",
        };
        write!(f, "{kind_str}")
    }
}

/// Status of an asynchronous operation as reported by the cloud.
///
/// Only [`Succeeded`](OperationStatus::Succeeded) and
/// [`Failed`](OperationStatus::Failed) are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    /// The operation is queued.
    NotStarted,
    /// The operation is running.
    Executing,
    /// The operation was interrupted and picked up again.
    Resumed,
    /// The operation finished successfully.
    Succeeded,
    /// The operation finished with an error.
    Failed,
    /// The cloud could not tell.
    #[default]
    Unknown,
}

impl OperationStatus {
    /// Returns `true` if the operation will not change its status anymore.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Succeeded | OperationStatus::Failed)
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            OperationStatus::NotStarted => "notStarted",
            OperationStatus::Executing => "executing",
            OperationStatus::Resumed => "resumed",
            OperationStatus::Succeeded => "succeeded",
            OperationStatus::Failed => "failed",
            OperationStatus::Unknown => "unknown",
        };
        write!(f, "{status_str}")
    }
}

impl FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notStarted" => Ok(OperationStatus::NotStarted),
            "executing" => Ok(OperationStatus::Executing),
            "resumed" => Ok(OperationStatus::Resumed),
            "succeeded" => Ok(OperationStatus::Succeeded),
            "failed" => Ok(OperationStatus::Failed),
            "unknown" => Ok(OperationStatus::Unknown),
            _ => Err(format!("Invalid value for OperationStatus: {s}")),
        }
    }
}

/// A token for a long-running action issued against one server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationHandle {
    /// The id the cloud assigned to the operation.
    pub id: String,
    /// The server the operation acts on.
    pub server_id: String,
    /// What the operation does.
    pub kind: OperationKind,
}

impl OperationHandle {
    /// Creates a new `OperationHandle`.
    pub fn new<T: Into<String>>(id: T, server_id: T, kind: OperationKind) -> OperationHandle {
        OperationHandle {
            id: id.into(),
            server_id: server_id.into(),
            kind,
        }
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} {})", self.id, self.kind, self.server_id)
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
