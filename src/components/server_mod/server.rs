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
use std::fmt;

use super::server_state_enums::{PowerState, ServerStatus};

/// Snapshot of a server as reported by the cloud.
///
/// A `Server` is plain data: it never talks to the cloud by itself. Fresh
/// values are obtained through [`CloudApi::get_servers`](crate::CloudApi::get_servers).
///
/// # Example
///
/// ```rust
/// use clc_fleet::{PowerState, Server, ServerStatus};
///
/// let server = Server::new("UC1ACCTWEB01", "grp-1", ServerStatus::Active, PowerState::Started);
/// assert!(server.is_running());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// The id (also the host name) of the server.
    pub id: String,
    /// The display name of the server.
    #[serde(default)]
    pub name: String,
    /// The provisioning status.
    pub status: ServerStatus,
    /// The power state.
    pub power_state: PowerState,
    /// The id of the group the server belongs to.
    pub group_id: String,
    /// The first internal IP address, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The first public IP address, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
}

impl Server {
    /// Creates a new `Server` snapshot.
    pub fn new<T: Into<String>>(
        id: T,
        group_id: T,
        status: ServerStatus,
        power_state: PowerState,
    ) -> Server {
        let id = id.into();
        Server {
            name: id.clone(),
            id,
            status,
            power_state,
            group_id: group_id.into(),
            ip_address: None,
            public_ip: None,
        }
    }

    /// A server counts towards the desired count only when it is active
    /// and powered on.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == ServerStatus::Active && self.power_state == PowerState::Started
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}] in group {}",
            self.id, self.status, self.power_state, self.group_id
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

#[cfg(test)]
mod tests {
    use super::{PowerState, Server, ServerStatus};

    #[test]
    fn utest_is_running() {
        assert!(Server::new("s1", "g", ServerStatus::Active, PowerState::Started).is_running());
        assert!(!Server::new("s1", "g", ServerStatus::Active, PowerState::Stopped).is_running());
        assert!(
            !Server::new("s1", "g", ServerStatus::UnderConstruction, PowerState::Started)
                .is_running()
        );
        assert!(!Server::new("s1", "g", ServerStatus::Active, PowerState::Paused).is_running());
    }

    #[test]
    fn utest_deserialize_api_snapshot() {
        let server: Server = serde_json::from_str(
            r#"{
                "id": "UC1ACCTWEB01",
                "name": "UC1ACCTWEB01",
                "status": "active",
                "powerState": "started",
                "groupId": "4d7cf8d4a8e5",
                "ipAddress": "10.0.0.12"
            }"#,
        )
        .unwrap();
        assert!(server.is_running());
        assert_eq!(server.ip_address.as_deref(), Some("10.0.0.12"));
        assert_eq!(server.public_ip, None);
        assert_eq!(
            server.to_string(),
            "UC1ACCTWEB01 [active, started] in group 4d7cf8d4a8e5"
        );
    }
}
