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
use std::collections::HashMap;

use crate::FleetError;

/// Maximum length of a server name; the cloud appends location, account
/// alias and a sequence number to it.
const MAX_NAME_LENGTH: usize = 6;
const DEFAULT_CPU: u32 = 1;
const DEFAULT_MEMORY_GB: u32 = 1;
const DEFAULT_STORAGE_TYPE: &str = "standard";
const DEFAULT_SERVER_TYPE: &str = "standard";

fn default_cpu() -> u32 {
    DEFAULT_CPU
}

fn default_memory() -> u32 {
    DEFAULT_MEMORY_GB
}

fn default_storage_type() -> String {
    DEFAULT_STORAGE_TYPE.to_owned()
}

fn default_server_type() -> String {
    DEFAULT_SERVER_TYPE.to_owned()
}

/// Checks the base name of a server before anything is provisioned.
pub(crate) fn validate_name(name: &str) -> Result<(), FleetError> {
    if (1..=MAX_NAME_LENGTH).contains(&name.chars().count()) {
        Ok(())
    } else {
        Err(FleetError::ServerBuilderError(
            "name must be a string with a minimum length of 1 and a maximum length of 6",
        ))
    }
}

/// An additional disk attached at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSpec {
    /// Mount path, for partitioned disks.
    #[serde(default)]
    pub path: Option<String>,
    /// Size in GB.
    pub size_gb: u32,
    /// `raw` or `partitioned`.
    #[serde(rename = "type")]
    pub disk_type: String,
}

/// A value for an account-level custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Id of the custom field.
    pub id: String,
    /// The value.
    pub value: String,
}

/// A blueprint package executed after provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    /// Id of the package.
    pub package_id: String,
    /// Package parameters.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Optional provisioning attributes passed through to the cloud untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerExtras {
    #[allow(missing_docs)]
    #[serde(default)]
    pub alias: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub password: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub ip_address: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub primary_dns: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub secondary_dns: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub additional_disks: Vec<DiskSpec>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Time to live, as an ISO 8601 timestamp.
    #[serde(default)]
    pub ttl: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub managed_os: bool,
    #[allow(missing_docs)]
    #[serde(default)]
    pub description: Option<String>,
    /// Password of the source server, for clone templates.
    #[serde(default)]
    pub source_server_password: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub cpu_autoscale_policy_id: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub anti_affinity_policy_id: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub packages: Vec<PackageSpec>,
}

/// The provisioning attributes of a server as written by the user.
///
/// `template` is a search term and `network_id` is optional; both are
/// resolved against the datacenter before a [`CreateServerRequest`] is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSpec {
    /// Base name of the server, 1 to 6 characters.
    #[serde(default)]
    pub name: String,
    /// Template search term.
    #[serde(default)]
    pub template: Option<String>,
    /// Network id; the first datacenter network is used when absent.
    #[serde(default)]
    pub network_id: Option<String>,
    /// Number of CPUs.
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    /// Memory in GB.
    #[serde(default = "default_memory")]
    pub memory: u32,
    /// `standard`, `premium` or `hyperscale`.
    #[serde(default = "default_storage_type")]
    pub storage_type: String,
    /// `standard` or `hyperscale`.
    #[serde(rename = "type", default = "default_server_type")]
    pub server_type: String,
    /// Everything else.
    #[serde(flatten)]
    pub extras: ServerExtras,
}

impl Default for ServerSpec {
    fn default() -> Self {
        Self {
            name: String::default(),
            template: None,
            network_id: None,
            cpu: DEFAULT_CPU,
            memory: DEFAULT_MEMORY_GB,
            storage_type: default_storage_type(),
            server_type: default_server_type(),
            extras: ServerExtras::default(),
        }
    }
}

/// A fully resolved request to provision one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    /// Base name of the server.
    pub name: String,
    /// Id of the template to provision from.
    pub template_id: String,
    /// Id of the group the server is placed in.
    pub group_id: String,
    /// Id of the network the server is attached to.
    pub network_id: String,
    /// Number of CPUs.
    pub cpu: u32,
    /// Memory in GB.
    pub memory_gb: u32,
    /// Storage type.
    pub storage_type: String,
    /// Server type.
    #[serde(rename = "type")]
    pub server_type: String,
    /// Optional attributes.
    #[serde(flatten)]
    pub extras: ServerExtras,
}

impl CreateServerRequest {
    /// Returns a new [`CreateServerRequestBuilder`].
    pub fn builder() -> CreateServerRequestBuilder {
        CreateServerRequestBuilder::new()
    }
}

/// A builder struct for the [`CreateServerRequest`] struct.
///
/// # Example
///
/// ```rust
/// use clc_fleet::CreateServerRequest;
///
/// let request = CreateServerRequest::builder()
///     .name("web")
///     .template_id("UBUNTU-14-64-TEMPLATE")
///     .group_id("4d7cf8d4a8e5")
///     .network_id("vlan_1234_10.0.0")
///     .cpu(2)
///     .memory(4)
///     .build()
///     .unwrap();
/// assert_eq!(request.storage_type, "standard");
/// ```
#[must_use]
#[derive(Debug)]
pub struct CreateServerRequestBuilder {
    name: String,
    template_id: String,
    group_id: String,
    network_id: String,
    cpu: u32,
    memory_gb: u32,
    storage_type: String,
    server_type: String,
    extras: ServerExtras,
}

impl Default for CreateServerRequestBuilder {
    fn default() -> Self {
        Self {
            name: String::default(),
            template_id: String::default(),
            group_id: String::default(),
            network_id: String::default(),
            cpu: DEFAULT_CPU,
            memory_gb: DEFAULT_MEMORY_GB,
            storage_type: default_storage_type(),
            server_type: default_server_type(),
            extras: ServerExtras::default(),
        }
    }
}

impl CreateServerRequestBuilder {
    /// Creates a new [`CreateServerRequestBuilder`] instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder prefilled with the attributes of a [`ServerSpec`].
    /// The template, group and network ids still have to be set.
    pub fn from_spec(spec: &ServerSpec) -> Self {
        let mut builder = Self::new()
            .name(spec.name.as_str())
            .cpu(spec.cpu)
            .memory(spec.memory)
            .storage_type(spec.storage_type.as_str())
            .server_type(spec.server_type.as_str())
            .extras(spec.extras.clone());
        if let Some(network_id) = &spec.network_id {
            builder = builder.network_id(network_id.as_str());
        }
        builder
    }

    /// Sets the base name.
    pub fn name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the template id.
    pub fn template_id<T: Into<String>>(mut self, template_id: T) -> Self {
        self.template_id = template_id.into();
        self
    }

    /// Sets the group id.
    pub fn group_id<T: Into<String>>(mut self, group_id: T) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Sets the network id.
    pub fn network_id<T: Into<String>>(mut self, network_id: T) -> Self {
        self.network_id = network_id.into();
        self
    }

    /// Sets the number of CPUs.
    pub fn cpu(mut self, cpu: u32) -> Self {
        self.cpu = cpu;
        self
    }

    /// Sets the memory in GB.
    pub fn memory(mut self, memory_gb: u32) -> Self {
        self.memory_gb = memory_gb;
        self
    }

    /// Sets the storage type.
    pub fn storage_type<T: Into<String>>(mut self, storage_type: T) -> Self {
        self.storage_type = storage_type.into();
        self
    }

    /// Sets the server type.
    pub fn server_type<T: Into<String>>(mut self, server_type: T) -> Self {
        self.server_type = server_type.into();
        self
    }

    /// Sets the optional attributes.
    pub fn extras(mut self, extras: ServerExtras) -> Self {
        self.extras = extras;
        self
    }

    /// Builds the [`CreateServerRequest`].
    ///
    /// ## Errors
    ///
    /// Returns an [`FleetError`]::[`ServerBuilderError`](FleetError::ServerBuilderError)
    /// if the name is not 1 to 6 characters long or a mandatory id is missing.
    pub fn build(self) -> Result<CreateServerRequest, FleetError> {
        validate_name(&self.name)?;
        if self.template_id.is_empty() {
            return Err(FleetError::ServerBuilderError(
                "Server can not be built without a template.",
            ));
        }
        if self.group_id.is_empty() {
            return Err(FleetError::ServerBuilderError(
                "Server can not be built without a group.",
            ));
        }
        if self.network_id.is_empty() {
            return Err(FleetError::ServerBuilderError(
                "Server can not be built without a network.",
            ));
        }
        if self.cpu == 0 || self.memory_gb == 0 {
            return Err(FleetError::ServerBuilderError(
                "Server needs at least one CPU and 1 GB of memory.",
            ));
        }

        Ok(CreateServerRequest {
            name: self.name,
            template_id: self.template_id,
            group_id: self.group_id,
            network_id: self.network_id,
            cpu: self.cpu,
            memory_gb: self.memory_gb,
            storage_type: self.storage_type,
            server_type: self.server_type,
            extras: self.extras,
        })
    }
}

//////////////////////////////////////////////////////////////////////////////
//                 ########  #######    #########  #########                //
//                    ##     ##        ##             ##                    //
//                    ##     #####     #########      ##                    //
//                    ##     ##                ##     ##                    //
//                    ##     #######   #########      ##                    //
//////////////////////////////////////////////////////////////////////////////
