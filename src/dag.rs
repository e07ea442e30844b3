/*
 * Copyright 2020 Google LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Backend descriptors handed from the graph builder to the Envoy
//! config generators.

use k8s_openapi::api::core::v1::{Service as KubeService, ServicePort};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single port of a Kubernetes service, as seen by Envoy.
///
/// `namespace`, `name` and `port` identify the backend. The remaining
/// fields only affect how Envoy talks to it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Service {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    /// The service port Envoy connects to.
    pub port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
}

/// Active health checking parameters for a backend. Zero means unset.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HealthCheck {
    /// HTTP path to probe.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub interval_seconds: i64,
    #[serde(default)]
    pub timeout_seconds: i64,
    #[serde(default)]
    pub unhealthy_threshold_count: u32,
    #[serde(default)]
    pub healthy_threshold_count: u32,
}

impl Service {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, port: i32) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            port,
            load_balancer_strategy: None,
            health_check: None,
        }
    }

    /// Builds the descriptor for one port of a Kubernetes service. Missing
    /// metadata is treated as empty.
    pub fn from_k8s(service: &KubeService, port: &ServicePort) -> Self {
        Self::new(
            service.metadata.namespace.clone().unwrap_or_default(),
            service.metadata.name.clone().unwrap_or_default(),
            port.port,
        )
    }

    /// One descriptor per declared port, in declaration order.
    pub fn all_from_k8s(service: &KubeService) -> Vec<Self> {
        service
            .spec
            .as_ref()
            .and_then(|spec| spec.ports.as_ref())
            .map(|ports| {
                ports
                    .iter()
                    .map(|port| Self::from_k8s(service, port))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn with_load_balancer_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.load_balancer_strategy = Some(strategy.into());
        self
    }

    pub fn with_health_check(mut self, health_check: HealthCheck) -> Self {
        self.health_check = Some(health_check);
        self
    }

    /// The `namespace/name:port` form used in logs and error messages.
    pub fn display_name(&self) -> String {
        format!("{}/{}:{}", self.namespace, self.name, self.port)
    }
}
