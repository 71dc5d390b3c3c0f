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

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs
)]
#![deny(
    rustdoc::broken_intra_doc_links
)]
#![allow(rustdoc::private_intra_doc_links)]

//! # Desired-state reconciliation for CenturyLink Cloud
//!
//! This crate resolves human readable group names against the group tree
//! of a datacenter and drives the servers of a group towards a desired
//! state: an exact number of running servers, a power state, or a public IP
//! configuration.
//!
//! The cloud itself is reached through the [`CloudApi`] trait, which the
//! caller implements on top of its own HTTP client and hands to [`Fleet`].
//!
#![doc = include_str!("../README.md")]

mod errors;
pub use errors::{ErrorReport, FleetError};

mod config;
pub use config::FleetConfig;

mod components;
pub use components::cloud_api::CloudApi;
pub use components::count_plan::{CountPlan, TerminationScope, partition_running, plan_exact_count};
pub use components::desired_state::{
    DEFAULT_GROUP, DesiredState, PublicIpRequest, PublicIpState, ServerState,
};
pub use components::group_mod::{
    DEFAULT_GROUP_TYPE, DEFAULT_PATH_DELIMITER, Group, GroupIndex, GroupPayload, GroupTree,
};
pub use components::operation::{OperationHandle, OperationKind, OperationStatus};
pub use components::reconcile_result::ReconcileResult;
pub use components::server_mod::{
    CreateServerRequest, CreateServerRequestBuilder, CustomField, DEFAULT_PROTOCOL, DiskSpec,
    PackageSpec, PortSpec, PowerState, PublicIp, Server, ServerExtras, ServerSpec, ServerStatus,
};

mod fleet;
pub use fleet::Fleet;
