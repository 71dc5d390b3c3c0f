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

//! This module contains the server snapshot, its state enums, the create
//! request with its builder and the public IP types.

mod public_ip;
mod server;
mod server_builder;
mod server_state_enums;

pub use public_ip::{DEFAULT_PROTOCOL, PortSpec, PublicIp};
pub use server::Server;
pub use server_builder::{
    CreateServerRequest, CreateServerRequestBuilder, CustomField, DiskSpec, PackageSpec,
    ServerExtras, ServerSpec,
};
pub use server_state_enums::{PowerState, ServerStatus};

pub(crate) use server_builder::validate_name;
