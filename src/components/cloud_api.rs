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

//! The boundary to the cloud provider.
//!
//! Everything that touches the network goes through [`CloudApi`]. The
//! library ships no implementation of it: authentication and the HTTP
//! transport belong to the caller, which constructs one client and hands it
//! to [`Fleet`](crate::Fleet) explicitly.

use async_trait::async_trait;

use crate::FleetError;
use crate::components::group_mod::GroupPayload;
use crate::components::operation::{OperationHandle, OperationStatus};
use crate::components::server_mod::{CreateServerRequest, PortSpec, PowerState, PublicIp, Server};

/// Capabilities of the cloud consumed by the resolver and the reconciler.
///
/// Mutating calls return an [`OperationHandle`] immediately; completion is
/// observed through [`operation_status`](CloudApi::operation_status).
/// Implementations report provider failures as
/// [`FleetError::ApiError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Fetches the root group of a datacenter with all of its descendants.
    async fn fetch_datacenter_group_tree(&self, datacenter: &str)
    -> Result<GroupPayload, FleetError>;

    /// Lists the servers placed directly in a group.
    async fn list_servers(&self, group_id: &str) -> Result<Vec<Server>, FleetError>;

    /// Fetches fresh snapshots of the given servers.
    async fn get_servers(&self, server_ids: &[String]) -> Result<Vec<Server>, FleetError>;

    /// Starts provisioning one server.
    async fn create_server(
        &self,
        request: &CreateServerRequest,
    ) -> Result<OperationHandle, FleetError>;

    /// Starts deleting one server.
    async fn delete_server(&self, server_id: &str) -> Result<OperationHandle, FleetError>;

    /// Starts powering a server on or off.
    async fn set_power_state(
        &self,
        server_id: &str,
        power_state: PowerState,
    ) -> Result<OperationHandle, FleetError>;

    /// Reads the current status of an operation.
    async fn operation_status(
        &self,
        handle: &OperationHandle,
    ) -> Result<OperationStatus, FleetError>;

    /// Searches the templates of a datacenter, best match first.
    async fn search_templates(
        &self,
        datacenter: &str,
        query: &str,
    ) -> Result<Vec<String>, FleetError>;

    /// Lists the network ids of a datacenter.
    async fn list_networks(&self, datacenter: &str) -> Result<Vec<String>, FleetError>;

    /// Lists the public IPs attached to a server.
    async fn list_public_ips(&self, server_id: &str) -> Result<Vec<PublicIp>, FleetError>;

    /// Starts attaching a new public IP that exposes the given ports.
    async fn add_public_ip(
        &self,
        server_id: &str,
        ports: &[PortSpec],
    ) -> Result<OperationHandle, FleetError>;

    /// Starts removing a public IP from a server.
    async fn delete_public_ip(
        &self,
        server_id: &str,
        public_ip: &str,
    ) -> Result<OperationHandle, FleetError>;
}
