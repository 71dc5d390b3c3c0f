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

//! This module contains the definition of the `FleetError` enum, which
//! represents the different types of errors that can occur while resolving
//! groups and reconciling servers in [CenturyLink Cloud].
//!
//! [CenturyLink Cloud]: https://www.ctl.io

use serde::Serialize;
use std::io;
use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::components::operation::{OperationKind, OperationStatus};

/// An enumeration of possible errors that can occur in the fleet library.
///
/// Every variant is terminal for the current invocation. Nothing is retried
/// internally; the caller is expected to run the reconciliation again.
#[derive(Error, Debug)]
pub enum FleetError {
    /// Represents an I/O error, wrapping a `std::io::Error`.
    #[error("IO Error: {0}")]
    IoError(#[from] io::Error),
    /// The bounded wait for the dispatched operations expired.
    /// Operations already issued are not cancelled.
    #[error("Timeout error: {0}")]
    TimeoutError(#[from] Elapsed),

    /// More than one group matches the requested name (and parent).
    #[error("{}", ambiguous_group_message(*count, name, parent.as_deref(), ids))]
    AmbiguousGroupError {
        /// Number of matching groups.
        count: usize,
        /// The searched group name.
        name: String,
        /// The optional parent group name used to narrow the search.
        parent: Option<String>,
        /// Ids of all the colliding groups.
        ids: Vec<String>,
    },
    /// No group matches the requested name (and parent).
    #[error("Unable to find group: \"{name}\"{} in location: {datacenter}", parent_suffix(parent.as_deref()))]
    GroupNotFoundError {
        /// The searched group name.
        name: String,
        /// The optional parent group name.
        parent: Option<String>,
        /// The datacenter that was searched.
        datacenter: String,
    },
    /// The request is inconsistent, e.g. `exactCount` without `countGroup`.
    #[error("Invalid configuration: {0}")]
    InvalidConfigurationError(String),
    /// An asynchronous operation ended in a non-success terminal state.
    #[error("Operation '{kind}' failed for server {server_id} with status: {status}")]
    OperationFailedError {
        /// The kind of the failed operation.
        kind: OperationKind,
        /// The server the operation was issued for.
        server_id: String,
        /// The terminal status reported by the provider.
        status: OperationStatus,
    },
    /// A create request could not be built from the given attributes.
    #[error("Server builder error: {0}")]
    ServerBuilderError(&'static str),
    /// No template matches the requested name in the datacenter.
    #[error("Unable to find a template: {template} in location: {datacenter}")]
    TemplateNotFoundError {
        /// The searched template.
        template: String,
        /// The searched datacenter.
        datacenter: String,
    },
    /// The datacenter has no network that could be used as default.
    #[error("Unable to find a network in location: {0}")]
    NetworkNotFoundError(String),
    /// The cloud API reported an error.
    #[error("Cloud API error: {0}")]
    ApiError(String),
    /// A desired state document could not be parsed or is not valid.
    #[error("Desired state parsing error: {0}")]
    DesiredStateParsingError(String),
    /// A configuration document could not be parsed.
    #[error("Config parsing error: {0}")]
    ConfigParsingError(String),
}

fn parent_suffix(parent: Option<&str>) -> String {
    parent
        .map(|parent| format!(" in group: \"{parent}\""))
        .unwrap_or_default()
}

fn ambiguous_group_message(count: usize, name: &str, parent: Option<&str>, ids: &[String]) -> String {
    let scope = match parent {
        Some(parent) => format!(" in group: \"{parent}\"."),
        None => ", no parent group specified.".to_owned(),
    };
    format!(
        "Found {count} groups with name: \"{name}\"{scope} Group ids: {}",
        ids.join(", ")
    )
}

impl FleetError {
    /// Returns the stable kind identifier of the error, suitable for
    /// machine consumption by the calling orchestrator.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FleetError::IoError(_) => "IoError",
            FleetError::TimeoutError(_) => "TimeoutError",
            FleetError::AmbiguousGroupError { .. } => "AmbiguousGroupError",
            FleetError::GroupNotFoundError { .. } => "GroupNotFoundError",
            FleetError::InvalidConfigurationError(_) => "InvalidConfigurationError",
            FleetError::OperationFailedError { .. } => "OperationFailedError",
            FleetError::ServerBuilderError(_) => "ServerBuilderError",
            FleetError::TemplateNotFoundError { .. } => "TemplateNotFoundError",
            FleetError::NetworkNotFoundError(_) => "NetworkNotFoundError",
            FleetError::ApiError(_) => "ApiError",
            FleetError::DesiredStateParsingError(_) => "DesiredStateParsingError",
            FleetError::ConfigParsingError(_) => "ConfigParsingError",
        }
    }
}

/// Structured, serializable form of a [`FleetError`] handed back to the
/// caller as `{ kind, message, details }`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorReport {
    /// The kind of the error, see [`FleetError::kind`].
    pub kind: String,
    /// The human readable message.
    pub message: String,
    /// Variant specific details, `null` when there are none.
    pub details: serde_json::Value,
}

impl From<&FleetError> for ErrorReport {
    fn from(error: &FleetError) -> Self {
        let details = match error {
            FleetError::AmbiguousGroupError {
                count,
                name,
                parent,
                ids,
            } => serde_json::json!({
                "count": count,
                "name": name,
                "parent": parent,
                "ids": ids,
            }),
            FleetError::GroupNotFoundError {
                name,
                parent,
                datacenter,
            } => serde_json::json!({
                "name": name,
                "parent": parent,
                "datacenter": datacenter,
            }),
            FleetError::OperationFailedError {
                kind,
                server_id,
                status,
            } => serde_json::json!({
                "operation": kind.to_string(),
                "serverId": server_id,
                "status": status.to_string(),
            }),
            FleetError::TemplateNotFoundError {
                template,
                datacenter,
            } => serde_json::json!({
                "template": template,
                "datacenter": datacenter,
            }),
            _ => serde_json::Value::Null,
        };
        ErrorReport {
            kind: error.kind().to_owned(),
            message: error.to_string(),
            details,
        }
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
