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
use std::{fmt, path::Path, str::FromStr};

use crate::FleetError;
use crate::components::server_mod::{DEFAULT_PROTOCOL, PortSpec, ServerSpec, validate_name};

/// The group servers are created in when none is given.
pub const DEFAULT_GROUP: &str = "Default Group";

// Disable this from coverage
// https://github.com/rust-lang/rust/issues/84605
#[cfg(not(test))]
fn read_file_to_string(path: &Path) -> Result<String, std::io::Error> {
    std::fs::read_to_string(path)
}

#[cfg(test)]
use self::read_to_string_mock as read_file_to_string;

fn default_group() -> String {
    DEFAULT_GROUP.to_owned()
}

fn default_wait() -> bool {
    true
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_owned()
}

/// What the caller wants to happen to the servers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerState {
    /// Servers are created, or the count of a group is enforced.
    #[default]
    Present,
    /// The listed servers are deleted.
    Absent,
    /// The listed servers are powered on.
    Started,
    /// The listed servers are powered off.
    Stopped,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            ServerState::Present => "present",
            ServerState::Absent => "absent",
            ServerState::Started => "started",
            ServerState::Stopped => "stopped",
        };
        write!(f, "{state_str}")
    }
}

impl FromStr for ServerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(ServerState::Present),
            "absent" => Ok(ServerState::Absent),
            "started" => Ok(ServerState::Started),
            "stopped" => Ok(ServerState::Stopped),
            _ => Err(format!("Invalid value for ServerState: {s}")),
        }
    }
}

/// The desired state of a set of servers, as handed over by the
/// orchestrator.
///
/// # Example
///
/// ## Load a desired state and validate it:
///
/// ```rust
/// use clc_fleet::DesiredState;
///
/// let desired_state = DesiredState::from_string(r#"
/// location: UC1
/// exactCount: 3
/// countGroup: Web
/// server:
///   name: web
///   template: ubuntu-14
/// "#).unwrap();
/// assert_eq!(desired_state.exact_count, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DesiredState {
    /// The datacenter; the configured default is used when absent.
    #[serde(default)]
    pub location: Option<String>,
    /// The group new servers are created in.
    #[serde(default = "default_group")]
    pub group: String,
    /// The name of the parent of the resolved group (`group`, or
    /// `countGroup` with `exactCount`), to tell apart equally named groups.
    #[serde(default)]
    pub parent_group: Option<String>,
    /// How many servers to create; one when absent.
    #[serde(default)]
    pub count: Option<usize>,
    /// The exact number of servers that shall be running in `count_group`.
    #[serde(default)]
    pub exact_count: Option<usize>,
    /// The group whose running servers are counted.
    #[serde(default)]
    pub count_group: Option<String>,
    /// What shall happen.
    #[serde(default)]
    pub state: ServerState,
    /// Whether to wait for the dispatched operations.
    #[serde(default = "default_wait")]
    pub wait: bool,
    /// The servers to delete, start or stop.
    #[serde(default)]
    pub server_ids: Vec<String>,
    /// How new servers are provisioned.
    #[serde(default)]
    pub server: ServerSpec,
}

impl Default for DesiredState {
    fn default() -> Self {
        Self {
            location: None,
            group: default_group(),
            parent_group: None,
            count: None,
            exact_count: None,
            count_group: None,
            state: ServerState::default(),
            wait: default_wait(),
            server_ids: Vec::new(),
            server: ServerSpec::default(),
        }
    }
}

impl DesiredState {
    /// Parses a desired state from a YAML (or JSON) string and validates it.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`DesiredStateParsingError`](FleetError::DesiredStateParsingError) if the document can not be parsed;
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if it is inconsistent, see [`DesiredState::validate`].
    pub fn from_string<T: Into<String>>(desired_state: T) -> Result<DesiredState, FleetError> {
        let desired_state: DesiredState = serde_yaml::from_str(&desired_state.into())
            .map_err(|err| FleetError::DesiredStateParsingError(err.to_string()))?;
        desired_state.validate()?;
        Ok(desired_state)
    }

    /// Reads a desired state from a file and validates it.
    ///
    /// ## Errors
    ///
    /// - [`FleetError`]::[`DesiredStateParsingError`](FleetError::DesiredStateParsingError) if the file can not be read or parsed;
    /// - [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if it is inconsistent.
    pub fn from_file(path: &Path) -> Result<DesiredState, FleetError> {
        match read_file_to_string(path) {
            Ok(content) => Self::from_string(content),
            Err(err) => Err(FleetError::DesiredStateParsingError(err.to_string())),
        }
    }

    /// Checks the combination of options before anything is sent to the
    /// cloud.
    ///
    /// ## Errors
    ///
    /// [`FleetError`]::[`InvalidConfigurationError`](FleetError::InvalidConfigurationError) if
    /// - `exactCount` is given without `countGroup`;
    /// - `exactCount` is combined with `count` or with a state other than `present`;
    /// - `present` is requested without a template;
    /// - `absent`, `started` or `stopped` is requested without `serverIds`.
    ///
    /// [`FleetError`]::[`ServerBuilderError`](FleetError::ServerBuilderError) if
    /// `present` is requested with a server name that is not 1 to 6 characters long.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.exact_count.is_some() {
            if self.count_group.is_none() {
                return Err(FleetError::InvalidConfigurationError(
                    "you must use the 'countGroup' option with exactCount".to_owned(),
                ));
            }
            if self.count.is_some() {
                return Err(FleetError::InvalidConfigurationError(
                    "exactCount and count are mutually exclusive".to_owned(),
                ));
            }
            if self.state != ServerState::Present {
                return Err(FleetError::InvalidConfigurationError(format!(
                    "exactCount can not be combined with state '{}'",
                    self.state
                )));
            }
        }

        match self.state {
            ServerState::Present => {
                if self.server.template.as_deref().is_none_or(str::is_empty) {
                    return Err(FleetError::InvalidConfigurationError(
                        "template parameter is required for new instance".to_owned(),
                    ));
                }
                validate_name(&self.server.name)?;
            }
            ServerState::Absent | ServerState::Started | ServerState::Stopped => {
                if self.server_ids.is_empty() {
                    return Err(FleetError::InvalidConfigurationError(format!(
                        "serverIds must list the servers to make {}",
                        self.state
                    )));
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for DesiredState {
    type Error = FleetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl TryFrom<&Path> for DesiredState {
    type Error = FleetError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        Self::from_file(value)
    }
}

/// Whether the servers of a [`PublicIpRequest`] shall have a public IP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublicIpState {
    /// Servers without a public IP get one.
    #[default]
    Present,
    /// All public IPs are removed.
    Absent,
}

/// The desired public IP configuration of a set of servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicIpRequest {
    /// The servers to act on.
    pub server_ids: Vec<String>,
    /// The protocol of the exposed ports.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// The ports to expose.
    #[serde(default)]
    pub ports: Vec<u16>,
    /// What shall happen.
    #[serde(default)]
    pub state: PublicIpState,
}

impl PublicIpRequest {
    /// Parses a public IP request from a YAML (or JSON) string.
    ///
    /// ## Errors
    ///
    /// [`FleetError`]::[`DesiredStateParsingError`](FleetError::DesiredStateParsingError) if the document can not be parsed.
    pub fn from_string<T: Into<String>>(request: T) -> Result<PublicIpRequest, FleetError> {
        serde_yaml::from_str(&request.into())
            .map_err(|err| FleetError::DesiredStateParsingError(err.to_string()))
    }

    /// The requested ports combined with the protocol.
    #[must_use]
    pub fn port_specs(&self) -> Vec<PortSpec> {
        self.ports
            .iter()
            .map(|port| PortSpec::new(self.protocol.as_str(), *port))
            .collect()
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
pub fn read_to_string_mock(path: &Path) -> Result<String, std::io::Error> {
    match path.to_str() {
        Some(content) if !content.is_empty() => Ok(content.to_owned()),
        _ => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "empty path",
        )),
    }
}

#[cfg(test)]
static DESIRED_STATE_CONTENT: &str = r#"
location: UC1
group: Web
parentGroup: Production
state: present
wait: false
server:
  name: web
  template: ubuntu-14
  cpu: 2
  memory: 4
  alias: acct
"#;

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::str::FromStr;

    use super::{
        DESIRED_STATE_CONTENT, DesiredState, PublicIpRequest, PublicIpState, ServerState,
    };
    use crate::FleetError;

    #[test]
    fn utest_creation() {
        let desired_state = DesiredState::from_file(Path::new(DESIRED_STATE_CONTENT)).unwrap();
        assert_eq!(desired_state.location.as_deref(), Some("UC1"));
        assert_eq!(desired_state.group, "Web");
        assert_eq!(desired_state.parent_group.as_deref(), Some("Production"));
        assert_eq!(desired_state.state, ServerState::Present);
        assert!(!desired_state.wait);
        assert_eq!(desired_state.server.cpu, 2);
        assert_eq!(desired_state.server.extras.alias.as_deref(), Some("acct"));

        assert!(DesiredState::try_from(DESIRED_STATE_CONTENT.to_owned()).is_ok());
        assert!(matches!(
            DesiredState::try_from(Path::new("")),
            Err(FleetError::DesiredStateParsingError(_))
        ));
    }

    #[test]
    fn utest_defaults() {
        let desired_state = DesiredState::from_string("server: {name: web, template: ubuntu}").unwrap();
        assert_eq!(desired_state.group, "Default Group");
        assert_eq!(desired_state.state, ServerState::Present);
        assert!(desired_state.wait);
        assert_eq!(desired_state.count, None);
        assert_eq!(desired_state.server.storage_type, "standard");
        assert_eq!(DesiredState::default().group, "Default Group");
    }

    #[test]
    fn utest_exact_count_requires_count_group() {
        let err = DesiredState::from_string("exactCount: 3\nserver: {name: web, template: ubuntu}")
            .unwrap_err();
        assert!(matches!(
            err,
            FleetError::InvalidConfigurationError(msg) if msg.contains("countGroup")
        ));
    }

    #[test]
    fn utest_exact_count_mutually_exclusive() {
        assert!(matches!(
            DesiredState::from_string(
                "exactCount: 3\ncountGroup: Web\ncount: 1\nserver: {name: web, template: ubuntu}"
            ),
            Err(FleetError::InvalidConfigurationError(_))
        ));
        assert!(matches!(
            DesiredState::from_string(
                "exactCount: 3\ncountGroup: Web\nstate: stopped\nserverIds: [s1]"
            ),
            Err(FleetError::InvalidConfigurationError(_))
        ));
    }

    #[test]
    fn utest_state_requirements() {
        assert!(matches!(
            DesiredState::from_string("state: present"),
            Err(FleetError::InvalidConfigurationError(msg)) if msg.contains("template")
        ));
        assert!(matches!(
            DesiredState::from_string("state: absent"),
            Err(FleetError::InvalidConfigurationError(msg)) if msg.contains("serverIds")
        ));
        let started =
            DesiredState::from_string("state: started\nserverIds: [s1, s2]").unwrap();
        assert_eq!(started.server_ids, vec!["s1", "s2"]);
    }

    #[test]
    fn utest_server_name_validated() {
        assert!(matches!(
            DesiredState::from_string("server: {name: toolong, template: ubuntu}"),
            Err(FleetError::ServerBuilderError(_))
        ));
        assert!(matches!(
            DesiredState::from_string("server: {template: ubuntu}"),
            Err(FleetError::ServerBuilderError(_))
        ));
    }

    #[test]
    fn utest_invalid_document() {
        assert!(matches!(
            DesiredState::from_string("state: rebooted\nserverIds: [s1]"),
            Err(FleetError::DesiredStateParsingError(_))
        ));
        assert!(matches!(
            DesiredState::from_string("exactCount: -1"),
            Err(FleetError::DesiredStateParsingError(_))
        ));
    }

    #[test]
    fn utest_unknown_key_rejected() {
        assert!(matches!(
            DesiredState::from_string(
                "exact_count: 3\ncount_group: Web\nserver: {name: web, template: ubuntu-14}"
            ),
            Err(FleetError::DesiredStateParsingError(_))
        ));
        assert!(matches!(
            PublicIpRequest::from_string("serverIds: [s1]\nport: [80]"),
            Err(FleetError::DesiredStateParsingError(_))
        ));
    }

    #[test]
    fn utest_server_state_from_str() {
        assert_eq!(ServerState::from_str("stopped"), Ok(ServerState::Stopped));
        assert_eq!(ServerState::Absent.to_string(), "absent");
        assert!(ServerState::from_str("paused").is_err());
    }

    #[test]
    fn utest_public_ip_request() {
        let request = PublicIpRequest::from_string("serverIds: [s1]\nports: [80, 443]").unwrap();
        assert_eq!(request.state, PublicIpState::Present);
        assert_eq!(request.protocol, "TCP");
        let ports = request.port_specs();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[1].port, 443);
        assert_eq!(ports[1].protocol, "TCP");

        assert!(PublicIpRequest::from_string("ports: [80]").is_err());
    }
}
