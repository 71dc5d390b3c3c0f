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

//! Runtime settings of a [`Fleet`](crate::Fleet).

use serde::Deserialize;
use std::path::Path;
use tokio::time::Duration;

use crate::FleetError;
use crate::components::count_plan::TerminationScope;

/// The default bound for waiting on dispatched operations.
const DEFAULT_TIMEOUT: u64 = 900; // seconds
/// The default pause between two status polls.
const DEFAULT_POLL_INTERVAL: u64 = 2000; // milliseconds

// Disable this from coverage
// https://github.com/rust-lang/rust/issues/84605
#[cfg(not(test))]
fn read_file_to_string(path: &Path) -> Result<String, std::io::Error> {
    std::fs::read_to_string(path)
}

#[cfg(test)]
use crate::components::desired_state::read_to_string_mock as read_file_to_string;

/// The on-disk shape of the configuration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    default_location: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,
    #[serde(default)]
    termination_scope: TerminationScope,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL
}

/// Settings shared by every call made through one [`Fleet`](crate::Fleet).
///
/// # Example
///
/// ```rust
/// use clc_fleet::FleetConfig;
/// use std::time::Duration;
///
/// let config = FleetConfig::from_string("defaultLocation: UC1\ntimeoutSecs: 60").unwrap();
/// assert_eq!(config.timeout, Duration::from_secs(60));
/// assert_eq!(config.poll_interval, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    /// The datacenter used when a request names none.
    pub default_location: Option<String>,
    /// Upper bound for one wait on dispatched operations.
    pub timeout: Duration,
    /// Pause between two rounds of status polls.
    pub poll_interval: Duration,
    /// The servers eligible for termination when a group runs too many.
    pub termination_scope: TerminationScope,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            default_location: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL),
            termination_scope: TerminationScope::default(),
        }
    }
}

impl FleetConfig {
    /// Parses a configuration from a YAML string. Missing keys keep their
    /// defaults.
    ///
    /// ## Errors
    ///
    /// [`FleetError`]::[`ConfigParsingError`](FleetError::ConfigParsingError) if the document is not valid.
    pub fn from_string<T: Into<String>>(config: T) -> Result<FleetConfig, FleetError> {
        let content = config.into();
        if content.trim().is_empty() {
            return Ok(FleetConfig::default());
        }
        let document: ConfigDocument = serde_yaml::from_str(&content)
            .map_err(|err| FleetError::ConfigParsingError(err.to_string()))?;
        if document.poll_interval_ms == 0 {
            return Err(FleetError::ConfigParsingError(
                "pollIntervalMs must be greater than 0".to_owned(),
            ));
        }
        Ok(FleetConfig {
            default_location: document.default_location,
            timeout: Duration::from_secs(document.timeout_secs),
            poll_interval: Duration::from_millis(document.poll_interval_ms),
            termination_scope: document.termination_scope,
        })
    }

    /// Reads a configuration from a YAML file.
    ///
    /// ## Errors
    ///
    /// [`FleetError`]::[`ConfigParsingError`](FleetError::ConfigParsingError) if the file can not be read or is not valid.
    pub fn from_file(path: &Path) -> Result<FleetConfig, FleetError> {
        match read_file_to_string(path) {
            Ok(content) => Self::from_string(content),
            Err(err) => Err(FleetError::ConfigParsingError(err.to_string())),
        }
    }

    /// Returns the config with another default location.
    #[must_use]
    pub fn with_default_location<T: Into<String>>(mut self, location: T) -> Self {
        self.default_location = Some(location.into());
        self
    }

    /// Returns the config with another wait timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the config with another poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the config with another termination scope.
    #[must_use]
    pub fn with_termination_scope(mut self, termination_scope: TerminationScope) -> Self {
        self.termination_scope = termination_scope;
        self
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
