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

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::time::Duration;

use clc_fleet::{DesiredState, FleetConfig, FleetError, ServerState, TerminationScope};

fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn utest_desired_state_from_file() {
    let file = write_temp_file(
        r#"
location: UC1
state: started
serverIds:
  - UC1ACCTWEB01
  - UC1ACCTWEB02
"#,
    );
    let desired_state = DesiredState::from_file(file.path()).unwrap();
    assert_eq!(desired_state.state, ServerState::Started);
    assert_eq!(desired_state.server_ids.len(), 2);

    let desired_state = DesiredState::try_from(file.path()).unwrap();
    assert_eq!(desired_state.location.as_deref(), Some("UC1"));
}

#[test]
fn utest_desired_state_from_missing_file() {
    assert!(matches!(
        DesiredState::from_file(Path::new("/nonexistent/desired_state.yaml")),
        Err(FleetError::DesiredStateParsingError(_))
    ));
}

#[test]
fn utest_desired_state_from_json() {
    let desired_state = DesiredState::from_string(
        r#"{"exactCount": 0, "countGroup": "Web", "server": {"name": "web", "template": "ubuntu"}}"#,
    )
    .unwrap();
    assert_eq!(desired_state.exact_count, Some(0));
}

#[test]
fn utest_config_from_file() {
    let file = write_temp_file("defaultLocation: VA1\ntimeoutSecs: 30\nterminationScope: runningOnly\n");
    let config = FleetConfig::from_file(file.path()).unwrap();
    assert_eq!(config.default_location.as_deref(), Some("VA1"));
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.poll_interval, Duration::from_secs(2));
    assert_eq!(config.termination_scope, TerminationScope::RunningOnly);
}

#[test]
fn utest_desired_state_file_with_misspelled_key() {
    let file = write_temp_file("exact_count: 0\ncount_group: Web\nserver: {name: web, template: ubuntu-14}\n");
    assert!(matches!(
        DesiredState::from_file(file.path()),
        Err(FleetError::DesiredStateParsingError(_))
    ));
}
