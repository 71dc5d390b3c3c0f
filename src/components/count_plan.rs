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

use crate::components::server_mod::Server;

/// Which servers of a group are candidates when surplus servers are
/// terminated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TerminationScope {
    /// Every server listed in the group, whatever its status or power state.
    #[default]
    AllInScope,
    /// Only the running servers of the group.
    RunningOnly,
}

impl fmt::Display for TerminationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope_str = match self {
            TerminationScope::AllInScope => "allInScope",
            TerminationScope::RunningOnly => "runningOnly",
        };
        write!(f, "{scope_str}")
    }
}

impl FromStr for TerminationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allInScope" => Ok(TerminationScope::AllInScope),
            "runningOnly" => Ok(TerminationScope::RunningOnly),
            _ => Err(format!("Invalid value for TerminationScope: {s}")),
        }
    }
}

/// The minimal change that brings the running servers of a group to an
/// exact count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountPlan {
    /// The group already runs the desired number of servers.
    NoOp,
    /// This many servers have to be created.
    Create(usize),
    /// These servers have to be terminated, in this order.
    Terminate(Vec<String>),
}

impl CountPlan {
    /// Returns `true` if the plan dispatches no operation.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, CountPlan::NoOp)
    }
}

/// Splits the servers of a group into running and not running ones,
/// keeping the listing order.
pub fn partition_running(servers: &[Server]) -> (Vec<&Server>, Vec<&Server>) {
    servers.iter().partition(|server| server.is_running())
}

/// Computes the [`CountPlan`] for a group.
///
/// Only running servers count towards the current size. Surplus servers are
/// picked from the lexicographically ascending ids of the servers in
/// `scope`, so `s10` is terminated before `s2`.
///
/// ## Arguments
///
/// - `servers`: All servers listed in the group;
/// - `exact_count`: The number of servers that shall be running;
/// - `scope`: The servers eligible for termination.
#[must_use]
pub fn plan_exact_count(
    servers: &[Server],
    exact_count: usize,
    scope: TerminationScope,
) -> CountPlan {
    let (running, _) = partition_running(servers);
    let current = running.len();

    if current == exact_count {
        return CountPlan::NoOp;
    }
    if current < exact_count {
        return CountPlan::Create(exact_count - current);
    }

    let mut candidates: Vec<&str> = match scope {
        TerminationScope::AllInScope => servers.iter().map(|s| s.id.as_str()).collect(),
        TerminationScope::RunningOnly => running.iter().map(|s| s.id.as_str()).collect(),
    };
    candidates.sort_unstable();
    CountPlan::Terminate(
        candidates
            .into_iter()
            .take(current - exact_count)
            .map(ToOwned::to_owned)
            .collect(),
    )
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
