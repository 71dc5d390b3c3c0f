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

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use tokio::time::Duration;

use clc_fleet::{
    CloudApi, CreateServerRequest, FleetConfig, FleetError, GroupPayload, OperationHandle,
    OperationKind, OperationStatus, PortSpec, PowerState, PublicIp, Server, ServerStatus,
};

pub const DATACENTER: &str = "UC1";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> FleetConfig {
    FleetConfig::default()
        .with_default_location(DATACENTER)
        .with_timeout(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(1))
}

/// UC1 Hardware / { Default Group, Production / { Web, Db }, Staging / Web }
pub const GROUPS_JSON: &str = r#"{
    "id": "root",
    "name": "UC1 Hardware",
    "type": "default",
    "groups": [
        {"id": "default-grp", "name": "Default Group", "type": "default"},
        {"id": "prod", "name": "Production", "type": "default", "groups": [
            {"id": "prod-web", "name": "Web", "type": "default"},
            {"id": "prod-db", "name": "Db", "type": "default"}
        ]},
        {"id": "staging", "name": "Staging", "type": "default", "groups": [
            {"id": "staging-web", "name": "Web", "type": "default"}
        ]},
        {"id": "archive", "name": "Archive", "type": "archive", "groups": [
            {"id": "archive-web", "name": "Web", "type": "default"}
        ]}
    ]
}"#;

struct PendingOperation {
    handle: OperationHandle,
    polls_left: usize,
    done: bool,
    port_specs: Vec<PortSpec>,
    public_ip: Option<String>,
}

#[derive(Default)]
struct FakeState {
    servers: BTreeMap<String, Server>,
    public_ips: HashMap<String, Vec<PublicIp>>,
    operations: HashMap<String, PendingOperation>,
    failing_servers: HashSet<String>,
    next_number: usize,
    calls: usize,
    created_in: Vec<String>,
}

/// An in-memory cloud. Operations finish after `polls_per_operation`
/// status polls and only then change the servers.
pub struct FakeCloud {
    groups: GroupPayload,
    templates: Vec<String>,
    networks: Vec<String>,
    polls_per_operation: usize,
    state: Mutex<FakeState>,
}

impl FakeCloud {
    pub fn new() -> FakeCloud {
        FakeCloud {
            groups: GroupPayload::from_json(GROUPS_JSON).unwrap(),
            templates: vec!["UBUNTU-14-64-TEMPLATE".to_owned()],
            networks: vec!["vlan_100_10.0.0".to_owned()],
            polls_per_operation: 2,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn without_templates(mut self) -> FakeCloud {
        self.templates.clear();
        self
    }

    pub fn with_server(self, id: &str, group_id: &str, power_state: PowerState) -> FakeCloud {
        let mut server = Server::new(id, group_id, ServerStatus::Active, power_state);
        {
            let mut state = self.state.lock().unwrap();
            server.ip_address = Some(format!("10.0.0.{}", state.servers.len() + 10));
            state.servers.insert(id.to_owned(), server);
        }
        self
    }

    pub fn with_public_ip(self, server_id: &str, public_ip: &str) -> FakeCloud {
        self.state
            .lock()
            .unwrap()
            .public_ips
            .entry(server_id.to_owned())
            .or_default()
            .push(PublicIp {
                id: public_ip.to_owned(),
                internal_ip: "10.0.0.1".to_owned(),
                ports: vec![PortSpec::new("TCP", 22)],
            });
        self
    }

    /// Every operation on this server ends as failed.
    pub fn failing_for(self, server_id: &str) -> FakeCloud {
        self.state
            .lock()
            .unwrap()
            .failing_servers
            .insert(server_id.to_owned());
        self
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn server(&self, id: &str) -> Option<Server> {
        self.state.lock().unwrap().servers.get(id).cloned()
    }

    pub fn server_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().servers.keys().cloned().collect()
    }

    pub fn running_in(&self, group_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .servers
            .values()
            .filter(|server| server.group_id == group_id && server.is_running())
            .map(|server| server.id.clone())
            .collect()
    }

    /// Group ids passed to `create_server`, in call order.
    pub fn created_in(&self) -> Vec<String> {
        self.state.lock().unwrap().created_in.clone()
    }

    fn start_operation(
        &self,
        state: &mut FakeState,
        server_id: &str,
        kind: OperationKind,
    ) -> OperationHandle {
        state.next_number += 1;
        let handle = OperationHandle::new(
            format!("op-{}", state.next_number),
            server_id.to_owned(),
            kind,
        );
        state.operations.insert(
            handle.id.clone(),
            PendingOperation {
                handle: handle.clone(),
                polls_left: self.polls_per_operation,
                done: false,
                port_specs: Vec::new(),
                public_ip: None,
            },
        );
        handle
    }
}

fn finish(state: &mut FakeState, operation: &PendingOperation) {
    let server_id = operation.handle.server_id.as_str();
    match operation.handle.kind {
        OperationKind::Create => {
            if let Some(server) = state.servers.get_mut(server_id) {
                server.status = ServerStatus::Active;
                server.power_state = PowerState::Started;
            }
        }
        OperationKind::Terminate => {
            state.servers.remove(server_id);
            state.public_ips.remove(server_id);
        }
        OperationKind::PowerOn | OperationKind::PowerOff => {
            if let Some(server) = state.servers.get_mut(server_id) {
                server.power_state = if operation.handle.kind == OperationKind::PowerOn {
                    PowerState::Started
                } else {
                    PowerState::Stopped
                };
            }
        }
        OperationKind::AddPublicIp => {
            let number = state.public_ips.len() + 1;
            state
                .public_ips
                .entry(server_id.to_owned())
                .or_default()
                .push(PublicIp {
                    id: format!("64.15.0.{number}"),
                    internal_ip: format!("10.0.1.{number}"),
                    ports: operation.port_specs.clone(),
                });
        }
        OperationKind::RemovePublicIp => {
            if let Some(public_ips) = state.public_ips.get_mut(server_id) {
                public_ips.retain(|ip| Some(&ip.id) != operation.public_ip.as_ref());
            }
        }
    }
}

#[async_trait]
impl CloudApi for FakeCloud {
    async fn fetch_datacenter_group_tree(
        &self,
        datacenter: &str,
    ) -> Result<GroupPayload, FleetError> {
        self.state.lock().unwrap().calls += 1;
        if datacenter != DATACENTER {
            return Err(FleetError::ApiError(format!(
                "Unknown location: {datacenter}"
            )));
        }
        Ok(self.groups.clone())
    }

    async fn list_servers(&self, group_id: &str) -> Result<Vec<Server>, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(state
            .servers
            .values()
            .filter(|server| server.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn get_servers(&self, server_ids: &[String]) -> Result<Vec<Server>, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(server_ids
            .iter()
            .filter_map(|id| state.servers.get(id).cloned())
            .collect())
    }

    async fn create_server(
        &self,
        request: &CreateServerRequest,
    ) -> Result<OperationHandle, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let id = format!(
            "{DATACENTER}ACCT{}{:02}",
            request.name.to_uppercase(),
            state.next_number + 1
        );
        state.servers.insert(
            id.clone(),
            Server::new(
                id.as_str(),
                request.group_id.as_str(),
                ServerStatus::UnderConstruction,
                PowerState::Stopped,
            ),
        );
        state.created_in.push(request.group_id.clone());
        Ok(self.start_operation(&mut state, &id, OperationKind::Create))
    }

    async fn delete_server(&self, server_id: &str) -> Result<OperationHandle, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if let Some(server) = state.servers.get_mut(server_id) {
            server.status = ServerStatus::QueuedForDelete;
        }
        Ok(self.start_operation(&mut state, server_id, OperationKind::Terminate))
    }

    async fn set_power_state(
        &self,
        server_id: &str,
        power_state: PowerState,
    ) -> Result<OperationHandle, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let kind = match power_state {
            PowerState::Started => OperationKind::PowerOn,
            _ => OperationKind::PowerOff,
        };
        Ok(self.start_operation(&mut state, server_id, kind))
    }

    async fn operation_status(
        &self,
        handle: &OperationHandle,
    ) -> Result<OperationStatus, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let Some(mut operation) = state.operations.remove(&handle.id) else {
            return Err(FleetError::ApiError(format!(
                "Unknown operation: {}",
                handle.id
            )));
        };
        let status = if operation.done {
            OperationStatus::Succeeded
        } else if operation.polls_left > 0 {
            operation.polls_left -= 1;
            OperationStatus::Executing
        } else if state.failing_servers.contains(&handle.server_id) {
            OperationStatus::Failed
        } else {
            finish(&mut state, &operation);
            operation.done = true;
            OperationStatus::Succeeded
        };
        state.operations.insert(handle.id.clone(), operation);
        Ok(status)
    }

    async fn search_templates(
        &self,
        _datacenter: &str,
        query: &str,
    ) -> Result<Vec<String>, FleetError> {
        self.state.lock().unwrap().calls += 1;
        let query = query.to_uppercase();
        Ok(self
            .templates
            .iter()
            .filter(|template| template.contains(&query))
            .cloned()
            .collect())
    }

    async fn list_networks(&self, _datacenter: &str) -> Result<Vec<String>, FleetError> {
        self.state.lock().unwrap().calls += 1;
        Ok(self.networks.clone())
    }

    async fn list_public_ips(&self, server_id: &str) -> Result<Vec<PublicIp>, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(state.public_ips.get(server_id).cloned().unwrap_or_default())
    }

    async fn add_public_ip(
        &self,
        server_id: &str,
        ports: &[PortSpec],
    ) -> Result<OperationHandle, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let handle = self.start_operation(&mut state, server_id, OperationKind::AddPublicIp);
        if let Some(operation) = state.operations.get_mut(&handle.id) {
            operation.port_specs = ports.to_vec();
        }
        Ok(handle)
    }

    async fn delete_public_ip(
        &self,
        server_id: &str,
        public_ip: &str,
    ) -> Result<OperationHandle, FleetError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let handle = self.start_operation(&mut state, server_id, OperationKind::RemovePublicIp);
        if let Some(operation) = state.operations.get_mut(&handle.id) {
            operation.public_ip = Some(public_ip.to_owned());
        }
        Ok(handle)
    }
}
