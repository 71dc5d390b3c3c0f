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
use std::{fmt, str::FromStr};

/// Enum representing the provisioning status of a Server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerStatus {
    /// The server is provisioned and usable.
    Active,
    /// The server is still being provisioned.
    UnderConstruction,
    /// The server is waiting to be deleted.
    QueuedForDelete,
    /// The server has been deleted.
    Deleted,
    /// The server has been archived.
    Archived,
    /// Any status the library does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Enum representing the power state of a Server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerState {
    /// The server is powered on.
    Started,
    /// The server is powered off.
    Stopped,
    /// The server is paused.
    Paused,
    /// Any power state the library does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ServerStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            ServerStatus::Active => "active",
            ServerStatus::UnderConstruction => "underConstruction",
            ServerStatus::QueuedForDelete => "queuedForDelete",
            ServerStatus::Deleted => "deleted",
            ServerStatus::Archived => "archived",
            ServerStatus::Unknown => "unknown",
        };
        write!(f, "{status_str}")
    }
}

impl FromStr for ServerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ServerStatus::Active),
            "underConstruction" => Ok(ServerStatus::UnderConstruction),
            "queuedForDelete" => Ok(ServerStatus::QueuedForDelete),
            "deleted" => Ok(ServerStatus::Deleted),
            "archived" => Ok(ServerStatus::Archived),
            "unknown" => Ok(ServerStatus::Unknown),
            _ => Err(format!("Invalid value for ServerStatus: {s}")),
        }
    }
}

impl fmt::Display for PowerState {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            PowerState::Started => "started",
            PowerState::Stopped => "stopped",
            PowerState::Paused => "paused",
            PowerState::Unknown => "unknown",
        };
        write!(f, "{state_str}")
    }
}

impl FromStr for PowerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(PowerState::Started),
            "stopped" => Ok(PowerState::Stopped),
            "paused" => Ok(PowerState::Paused),
            "unknown" => Ok(PowerState::Unknown),
            _ => Err(format!("Invalid value for PowerState: {s}")),
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

#[cfg(test)]
mod tests {
    use super::{PowerState, ServerStatus};
    use std::str::FromStr;

    macro_rules! generate_conversion_test {
        ($test_name:ident, $enum_type:ty, $value:expr, $text:expr) => {
            #[test]
            fn $test_name() {
                assert_eq!(<$enum_type>::from_str($text), Ok($value));
                assert_eq!($value.to_string(), $text);
            }
        };
    }

    generate_conversion_test!(utest_status_active, ServerStatus, ServerStatus::Active, "active");
    generate_conversion_test!(
        utest_status_under_construction,
        ServerStatus,
        ServerStatus::UnderConstruction,
        "underConstruction"
    );
    generate_conversion_test!(
        utest_status_queued_for_delete,
        ServerStatus,
        ServerStatus::QueuedForDelete,
        "queuedForDelete"
    );
    generate_conversion_test!(utest_power_started, PowerState, PowerState::Started, "started");
    generate_conversion_test!(utest_power_stopped, PowerState, PowerState::Stopped, "stopped");
    generate_conversion_test!(utest_power_paused, PowerState, PowerState::Paused, "paused");

    #[test]
    fn utest_invalid_values() {
        assert!(ServerStatus::from_str("running").is_err());
        assert!(PowerState::from_str("on").is_err());
    }

    #[test]
    fn utest_unknown_values_deserialize() {
        let status: ServerStatus = serde_json::from_str("\"migrating\"").unwrap();
        assert_eq!(status, ServerStatus::Unknown);
        let power: PowerState = serde_json::from_str("\"hibernated\"").unwrap();
        assert_eq!(power, PowerState::Unknown);
    }
}
