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

//! This module contains structs and enums that are used to
//! describe the servers, groups and operations of a [CenturyLink Cloud]
//! account.
//!
//! [CenturyLink Cloud]: https://www.ctl.io

pub mod cloud_api;
pub mod count_plan;
pub mod desired_state;
pub mod group_mod;
pub mod operation;
pub mod reconcile_result;
pub mod server_mod;
