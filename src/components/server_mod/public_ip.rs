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

/// The protocol used when none is requested.
pub const DEFAULT_PROTOCOL: &str = "TCP";

/// A port exposed through a public IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// The protocol, e.g. `TCP` or `UDP`.
    pub protocol: String,
    /// The port number.
    pub port: u16,
}

impl PortSpec {
    /// Creates a new `PortSpec`.
    pub fn new<T: Into<String>>(protocol: T, port: u16) -> PortSpec {
        PortSpec {
            protocol: protocol.into(),
            port,
        }
    }
}

/// A public IP attached to a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIp {
    /// The public address, which is also its id.
    pub id: String,
    /// The internal address it is mapped to.
    pub internal_ip: String,
    /// The exposed ports.
    #[serde(default)]
    pub ports: Vec<PortSpec>,
}
