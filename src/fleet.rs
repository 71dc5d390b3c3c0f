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

//! This module contains the definition of the `Fleet` struct, which
//! resolves groups and reconciles the servers of a [CenturyLink Cloud]
//! account against a desired state.
//!
//! [CenturyLink Cloud]: https://www.ctl.io

use std::collections::HashMap;
use tokio::time::{sleep, timeout as tokio_timeout};
use uuid::Uuid;

use crate::components::cloud_api::CloudApi;
use crate::components::count_plan::{CountPlan, partition_running, plan_exact_count};
use crate::components::desired_state::{
    DesiredState, PublicIpRequest, PublicIpState, ServerState,
};
use crate::components::group_mod::{Group, GroupTree};
use crate::components::operation::{OperationHandle, OperationStatus};
use crate::components::reconcile_result::ReconcileResult;
use crate::components::server_mod::{
    CreateServerRequest, CreateServerRequestBuilder, PowerState, Server, ServerSpec,
};
use crate::{FleetConfig, FleetError};

/// This struct drives the cloud towards a desired state using an explicit
/// [`CloudApi`] client.
///
/// Every call is a single pass: the current state is read, the minimal set
/// of operations is dispatched and, unless the caller opts out, awaited
/// together. Nothing is kept between calls.
///
/// # Examples
///
/// ## Enforce the number of running servers of a group:
///
/// ```rust,no_run
/// # use clc_fleet::{CloudApi, DesiredState, Fleet, FleetConfig};
/// # async fn run<A: CloudApi>(api: A) -> Result<(), clc_fleet::FleetError> {
/// let fleet = Fleet::new_with_config(api, FleetConfig::default().with_default_location("UC1"));
/// let desired_state = DesiredState::from_string(r#"
/// exactCount: 3
/// countGroup: Web
/// server:
///   name: web
///   template: ubuntu-14
/// "#)?;
/// let result = fleet.apply(&desired_state).await?;
/// println!("{}", result.to_json());
/// # Ok(())
/// # }
/// ```
///
/// ## Resolve a group and print its path:
///
/// ```rust,no_run
/// # use clc_fleet::{CloudApi, Fleet};
/// # async fn run<A: CloudApi>(api: A) -> Result<(), clc_fleet::FleetError> {
/// let fleet = Fleet::new(api);
/// let tree = fleet.group_tree("UC1").await?;
/// if let Some(group) = tree.find_group("Web", Some("Production"))? {
///     println!("{}", tree.path(group));
/// }
/// # Ok(())
/// # }
/// ```
pub struct Fleet<A: CloudApi> {
    /// The client used for every call to the cloud.
    api: A,
    /// The settings used for every call.
    pub config: FleetConfig,
}

impl<A: CloudApi> Fleet<A> {
    /// Creates a new `Fleet` with the default [`FleetConfig`].
    pub fn new(api: A) -> Self {
        Self::new_with_config(api, FleetConfig::default())
    }

    /// Creates a new `Fleet` with a custom [`FleetConfig`].
    pub fn new_with_config(api: A, config: FleetConfig) -> Self {
        Self { api, config }
    }

    /// The client this fleet talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Picks the datacenter of a request: the given location, otherwise the
    /// configured default.
    ///
    /// ## Errors
    ///
    /// [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if neither is set.
    pub fn resolve_datacenter(&self, location: Option<&str>) -> Result<String, FleetError> {
        location
            .or(self.config.default_location.as_deref())
            .filter(|location| !location.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                FleetError::InvalidConfigurationError(
                    "no location given and no default location configured".to_owned(),
                )
            })
    }

    /// Fetches the group hierarchy of a datacenter in one call and builds
    /// the tree.
    ///
    /// ## Errors
    ///
    /// Any error reported by the [`CloudApi`].
    pub async fn group_tree(&self, datacenter: &str) -> Result<GroupTree, FleetError> {
        let payload = self.api.fetch_datacenter_group_tree(datacenter).await?;
        Ok(GroupTree::build(&payload))
    }

    /// Looks up the unique group with the given name in a datacenter.
    ///
    /// ## Returns
    ///
    /// - `Some(group)` if exactly one group matches, `None` if none does.
    ///
    /// The returned [`Group`] is detached from the tree it was found in:
    /// its `id`, `name`, `description` and `group_type` are valid, its
    /// indices are not. Use [`Fleet::group_tree`] and
    /// [`GroupTree::find_group`] to walk the hierarchy.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`AmbiguousGroupError`](FleetError::AmbiguousGroupError) if more than one group matches;
    /// - any error reported by the [`CloudApi`].
    pub async fn find_group(
        &self,
        datacenter: &str,
        group_name: &str,
        parent_name: Option<&str>,
    ) -> Result<Option<Group>, FleetError> {
        let tree = self.group_tree(datacenter).await?;
        Ok(tree.find_group(group_name, parent_name)?.cloned())
    }

    /// Like [`Fleet::find_group`], but a missing group is an error. The
    /// returned [`Group`] is detached from its tree in the same way.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`GroupNotFoundError`](FleetError::GroupNotFoundError) if no group matches;
    /// - [`FleetError`]::[`AmbiguousGroupError`](FleetError::AmbiguousGroupError) if more than one group matches;
    /// - any error reported by the [`CloudApi`].
    pub async fn resolve_group(
        &self,
        datacenter: &str,
        group_name: &str,
        parent_name: Option<&str>,
    ) -> Result<Group, FleetError> {
        match self.find_group(datacenter, group_name, parent_name).await? {
            Some(group) => Ok(group),
            None => {
                log::error!("Group '{group_name}' not found in {datacenter}.");
                Err(FleetError::GroupNotFoundError {
                    name: group_name.to_owned(),
                    parent: parent_name.map(ToOwned::to_owned),
                    datacenter: datacenter.to_owned(),
                })
            }
        }
    }

    /// Applies a desired state document.
    ///
    /// The document is validated before anything is sent to the cloud.
    /// Depending on its state, servers are created or the count of a group
    /// is enforced (`present`), servers are deleted (`absent`) or powered
    /// on or off (`started`, `stopped`).
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if the document is inconsistent or no datacenter can be determined;
    /// - any error of the operation the state dispatches to.
    pub async fn apply(&self, desired_state: &DesiredState) -> Result<ReconcileResult, FleetError> {
        desired_state.validate()?;

        match desired_state.state {
            ServerState::Absent => {
                self.terminate_servers(&desired_state.server_ids, desired_state.wait)
                    .await
            }
            ServerState::Started => {
                self.set_power_state(
                    &desired_state.server_ids,
                    PowerState::Started,
                    desired_state.wait,
                )
                .await
            }
            ServerState::Stopped => {
                self.set_power_state(
                    &desired_state.server_ids,
                    PowerState::Stopped,
                    desired_state.wait,
                )
                .await
            }
            ServerState::Present => {
                let datacenter = self.resolve_datacenter(desired_state.location.as_deref())?;
                let parent_name = desired_state.parent_group.as_deref();
                match desired_state.exact_count {
                    Some(exact_count) => {
                        let count_group =
                            desired_state.count_group.as_deref().ok_or_else(|| {
                                FleetError::InvalidConfigurationError(
                                    "you must use the 'countGroup' option with exactCount"
                                        .to_owned(),
                                )
                            })?;
                        let group = self
                            .resolve_group(&datacenter, count_group, parent_name)
                            .await?;
                        self.reconcile(
                            &datacenter,
                            &group,
                            exact_count,
                            &desired_state.server,
                            desired_state.wait,
                        )
                        .await
                    }
                    None => {
                        let group = self
                            .resolve_group(&datacenter, &desired_state.group, parent_name)
                            .await?;
                        self.create_servers(
                            &datacenter,
                            &group,
                            &desired_state.server,
                            desired_state.count.unwrap_or(1),
                            desired_state.wait,
                        )
                        .await
                    }
                }
            }
        }
    }

    /// Makes exactly `exact_count` servers run in a group.
    ///
    /// Only servers that are active and started count. Missing servers are
    /// created in the group; surplus servers are terminated, lowest ids
    /// first (see [`TerminationScope`](crate::TerminationScope)).
    ///
    /// ## Arguments
    ///
    /// - `datacenter`: The datacenter of the group;
    /// - `group`: The resolved count group;
    /// - `exact_count`: The number of servers that shall be running;
    /// - `spec`: How missing servers are provisioned;
    /// - `wait`: Whether to wait for the dispatched operations.
    ///
    /// ## Returns
    ///
    /// The running servers after the pass. `changed` is `false` when the
    /// group already matched, including `0 == 0`.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) if an operation failed;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the operations did not finish in time;
    /// - the errors of [`Fleet::create_servers`] while preparing new servers;
    /// - any error reported by the [`CloudApi`].
    pub async fn reconcile(
        &self,
        datacenter: &str,
        group: &Group,
        exact_count: usize,
        spec: &ServerSpec,
        wait: bool,
    ) -> Result<ReconcileResult, FleetError> {
        let run_id = Uuid::new_v4();
        let servers = self.api.list_servers(&group.id).await?;
        let (running, _) = partition_running(&servers);
        let running: Vec<Server> = running.into_iter().cloned().collect();
        log::info!(
            "[{run_id}] Group {group} runs {} of {} listed servers, {exact_count} wanted.",
            running.len(),
            servers.len()
        );

        match plan_exact_count(&servers, exact_count, self.config.termination_scope) {
            CountPlan::NoOp => {
                log::debug!("[{run_id}] Nothing to do.");
                Ok(ReconcileResult::unchanged(running))
            }
            CountPlan::Create(to_create) => {
                log::info!("[{run_id}] Creating {to_create} servers.");
                let request = self.prepare_create_request(datacenter, group, spec).await?;
                let handles = self.dispatch_creates(&request, to_create).await?;
                let created_ids = server_ids_of(&handles);

                if !wait {
                    return Ok(ReconcileResult::new(true, running, created_ids)
                        .with_pending_operations(handles));
                }
                self.wait_for_operations(&handles).await?;
                let created = self.refresh_servers(&created_ids).await?;

                let mut servers = running;
                servers.extend(created);
                Ok(ReconcileResult::new(true, servers, created_ids))
            }
            CountPlan::Terminate(to_remove) => {
                log::info!(
                    "[{run_id}] Terminating {} servers: {}",
                    to_remove.len(),
                    to_remove.join(", ")
                );
                let handles = self.dispatch_deletes(&to_remove).await?;
                let remaining: Vec<Server> = running
                    .into_iter()
                    .filter(|server| !to_remove.contains(&server.id))
                    .collect();

                if !wait {
                    return Ok(ReconcileResult::new(true, remaining, to_remove)
                        .with_pending_operations(handles));
                }
                self.wait_for_operations(&handles).await?;
                Ok(ReconcileResult::new(true, remaining, to_remove))
            }
        }
    }

    /// Provisions `count` new servers in a group.
    ///
    /// The template of `spec` is resolved through a template search in the
    /// datacenter (best match); without a network id the first network of
    /// the datacenter is used.
    ///
    /// ## Returns
    ///
    /// The created servers, refreshed after the wait. Nothing happens when
    /// `count` is `0`.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`TemplateNotFoundError`](FleetError::TemplateNotFoundError) if no template matches;
    /// - [`FleetError`]::[`NetworkNotFoundError`](FleetError::NetworkNotFoundError) if the datacenter has no network;
    /// - [`FleetError`]::[`ServerBuilderError`](FleetError::ServerBuilderError) if the attributes are not valid;
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) if a creation failed;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the creations did not finish in time.
    pub async fn create_servers(
        &self,
        datacenter: &str,
        group: &Group,
        spec: &ServerSpec,
        count: usize,
        wait: bool,
    ) -> Result<ReconcileResult, FleetError> {
        if count == 0 {
            log::debug!("No server to create in group {group}.");
            return Ok(ReconcileResult::unchanged(Vec::new()));
        }
        let request = self.prepare_create_request(datacenter, group, spec).await?;
        let handles = self.dispatch_creates(&request, count).await?;
        let created_ids = server_ids_of(&handles);

        if !wait {
            return Ok(ReconcileResult::new(true, Vec::new(), created_ids)
                .with_pending_operations(handles));
        }
        self.wait_for_operations(&handles).await?;
        let created = self.refresh_servers(&created_ids).await?;
        Ok(ReconcileResult::new(true, created, created_ids))
    }

    /// Deletes the listed servers.
    ///
    /// ## Returns
    ///
    /// The snapshots of the deleted servers, taken before the deletion was
    /// issued.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if no server is listed;
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) if a deletion failed;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the deletions did not finish in time.
    pub async fn terminate_servers(
        &self,
        server_ids: &[String],
        wait: bool,
    ) -> Result<ReconcileResult, FleetError> {
        if server_ids.is_empty() {
            return Err(FleetError::InvalidConfigurationError(
                "serverIds must list the servers to terminate".to_owned(),
            ));
        }
        let snapshots = self.api.get_servers(server_ids).await?;
        let to_remove: Vec<String> = snapshots.iter().map(|server| server.id.clone()).collect();
        let handles = self.dispatch_deletes(&to_remove).await?;
        let changed = !handles.is_empty();

        if !wait {
            return Ok(ReconcileResult::new(changed, snapshots, to_remove)
                .with_pending_operations(handles));
        }
        self.wait_for_operations(&handles).await?;
        Ok(ReconcileResult::new(changed, snapshots, to_remove))
    }

    /// Powers the listed servers on or off.
    ///
    /// Servers that already are in the target power state are left alone
    /// and are not part of the result.
    ///
    /// ## Arguments
    ///
    /// - `server_ids`: The servers to act on;
    /// - `target`: [`PowerState::Started`] or [`PowerState::Stopped`];
    /// - `wait`: Whether to wait for the dispatched operations.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if no server is listed or the target is neither started nor stopped;
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) if a power change failed;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the power changes did not finish in time.
    pub async fn set_power_state(
        &self,
        server_ids: &[String],
        target: PowerState,
        wait: bool,
    ) -> Result<ReconcileResult, FleetError> {
        if server_ids.is_empty() {
            return Err(FleetError::InvalidConfigurationError(format!(
                "serverIds must list the servers to make {target}"
            )));
        }
        if !matches!(target, PowerState::Started | PowerState::Stopped) {
            return Err(FleetError::InvalidConfigurationError(format!(
                "Unsupported target power state: {target}"
            )));
        }

        let servers = self.api.get_servers(server_ids).await?;
        let mut handles = Vec::new();
        for server in servers.iter().filter(|server| server.power_state != target) {
            log::debug!("Changing power state of {server} to {target}.");
            handles.push(self.api.set_power_state(&server.id, target).await?);
        }
        let changed_ids = server_ids_of(&handles);
        if handles.is_empty() {
            log::debug!("All servers are already {target}.");
            return Ok(ReconcileResult::unchanged(Vec::new()));
        }

        if !wait {
            let changed: Vec<Server> = servers
                .into_iter()
                .filter(|server| changed_ids.contains(&server.id))
                .collect();
            return Ok(ReconcileResult::new(true, changed, changed_ids)
                .with_pending_operations(handles));
        }
        self.wait_for_operations(&handles).await?;
        let refreshed = self.refresh_servers(&changed_ids).await?;
        Ok(ReconcileResult::new(true, refreshed, changed_ids))
    }

    /// Adds or removes the public IPs of the listed servers.
    ///
    /// With [`PublicIpState::Present`] every server without a public IP
    /// gets one exposing the requested ports. With
    /// [`PublicIpState::Absent`] every public IP of the servers is removed.
    /// The operations are always awaited.
    ///
    /// ## Returns
    ///
    /// The changed servers, refreshed, with their first public IP filled in.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if no server is listed or no port is requested for `present`;
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) if an operation failed;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the operations did not finish in time.
    pub async fn apply_public_ips(
        &self,
        request: &PublicIpRequest,
    ) -> Result<ReconcileResult, FleetError> {
        if request.server_ids.is_empty() {
            return Err(FleetError::InvalidConfigurationError(
                "serverIds must list the servers to change".to_owned(),
            ));
        }
        let ports = request.port_specs();
        if request.state == PublicIpState::Present && ports.is_empty() {
            return Err(FleetError::InvalidConfigurationError(
                "ports must list at least one port to expose".to_owned(),
            ));
        }

        let servers = self.api.get_servers(&request.server_ids).await?;
        let mut handles = Vec::new();
        let mut changed_ids = Vec::new();
        for server in &servers {
            let public_ips = self.api.list_public_ips(&server.id).await?;
            match request.state {
                PublicIpState::Present if public_ips.is_empty() => {
                    handles.push(self.api.add_public_ip(&server.id, &ports).await?);
                    changed_ids.push(server.id.clone());
                }
                PublicIpState::Absent if !public_ips.is_empty() => {
                    for public_ip in &public_ips {
                        handles.push(self.api.delete_public_ip(&server.id, &public_ip.id).await?);
                    }
                    changed_ids.push(server.id.clone());
                }
                _ => log::trace!("Public IPs of {} already match.", server.id),
            }
        }

        self.wait_for_operations(&handles).await?;
        let mut refreshed = self.refresh_servers(&changed_ids).await?;
        for server in &mut refreshed {
            let public_ips = self.api.list_public_ips(&server.id).await?;
            server.public_ip = public_ips.first().map(|public_ip| public_ip.id.clone());
            if server.ip_address.is_none() {
                server.ip_address = public_ips
                    .first()
                    .map(|public_ip| public_ip.internal_ip.clone());
            }
        }
        Ok(ReconcileResult::new(
            !changed_ids.is_empty(),
            refreshed,
            changed_ids,
        ))
    }

    /// Waits until every operation reached a terminal status.
    ///
    /// All pending operations are polled in each round; the wait as a
    /// whole is bounded by the configured timeout. Operations that are
    /// still running when the timeout expires are not cancelled.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`OperationFailedError`](FleetError::OperationFailedError) for the first failed operation in the given order, after all operations finished;
    /// - [`FleetError`]::[`TimeoutError`](FleetError::TimeoutError) if the timeout was reached;
    /// - any error reported by the [`CloudApi`].
    pub async fn wait_for_operations(&self, handles: &[OperationHandle]) -> Result<(), FleetError> {
        if handles.is_empty() {
            return Ok(());
        }
        log::debug!("Waiting for {} operations.", handles.len());

        let poll_interval = self.config.poll_interval;
        let poll_future = async {
            let mut statuses: Vec<Option<OperationStatus>> = vec![None; handles.len()];
            loop {
                for (handle, status) in handles.iter().zip(statuses.iter_mut()) {
                    if status.is_some() {
                        continue;
                    }
                    let current = self.api.operation_status(handle).await?;
                    if current.is_terminal() {
                        log::trace!("Operation {handle} finished: {current}");
                        *status = Some(current);
                    }
                }
                if statuses.iter().all(Option::is_some) {
                    return Ok::<_, FleetError>(statuses.into_iter().flatten().collect::<Vec<_>>());
                }

                sleep(poll_interval).await;
            }
        };

        let statuses = match tokio_timeout(self.config.timeout, poll_future).await {
            Ok(Ok(statuses)) => statuses,
            Ok(Err(err)) => {
                log::error!("Error while waiting for operations: {err}");
                return Err(err);
            }
            Err(err) => {
                log::error!("Timeout while waiting for operations: {err}");
                return Err(FleetError::TimeoutError(err));
            }
        };

        let mut first_failure = None;
        for (handle, status) in handles.iter().zip(statuses) {
            if status != OperationStatus::Succeeded {
                log::error!("Operation {handle} ended with status: {status}");
                first_failure.get_or_insert(FleetError::OperationFailedError {
                    kind: handle.kind,
                    server_id: handle.server_id.clone(),
                    status,
                });
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    async fn prepare_create_request(
        &self,
        datacenter: &str,
        group: &Group,
        spec: &ServerSpec,
    ) -> Result<CreateServerRequest, FleetError> {
        let template = spec.template.as_deref().unwrap_or_default();
        let template_id = self
            .api
            .search_templates(datacenter, template)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FleetError::TemplateNotFoundError {
                template: template.to_owned(),
                datacenter: datacenter.to_owned(),
            })?;

        let mut builder = CreateServerRequestBuilder::from_spec(spec)
            .template_id(template_id)
            .group_id(group.id.as_str());
        if spec.network_id.is_none() {
            let network_id = self
                .api
                .list_networks(datacenter)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| FleetError::NetworkNotFoundError(datacenter.to_owned()))?;
            builder = builder.network_id(network_id);
        }
        builder.build()
    }

    async fn dispatch_creates(
        &self,
        request: &CreateServerRequest,
        count: usize,
    ) -> Result<Vec<OperationHandle>, FleetError> {
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let handle = self.api.create_server(request).await?;
            log::debug!("Dispatched {handle}");
            handles.push(handle);
        }
        Ok(handles)
    }

    async fn dispatch_deletes(
        &self,
        server_ids: &[String],
    ) -> Result<Vec<OperationHandle>, FleetError> {
        let mut handles = Vec::with_capacity(server_ids.len());
        for server_id in server_ids {
            let handle = self.api.delete_server(server_id).await?;
            log::debug!("Dispatched {handle}");
            handles.push(handle);
        }
        Ok(handles)
    }

    /// Fetches fresh snapshots, in the order of `server_ids`.
    async fn refresh_servers(&self, server_ids: &[String]) -> Result<Vec<Server>, FleetError> {
        if server_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut fetched: HashMap<String, Server> = self
            .api
            .get_servers(server_ids)
            .await?
            .into_iter()
            .map(|server| (server.id.clone(), server))
            .collect();

        let mut servers = Vec::with_capacity(server_ids.len());
        for server_id in server_ids {
            match fetched.remove(server_id) {
                Some(server) => servers.push(server),
                None => log::warn!("Server {server_id} is missing after refresh."),
            }
        }
        Ok(servers)
    }
}

fn server_ids_of(handles: &[OperationHandle]) -> Vec<String> {
    handles
        .iter()
        .map(|handle| handle.server_id.clone())
        .collect()
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
