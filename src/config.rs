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

//! The configuration file: the services to generate clusters for and the
//! settings of the generated listener.

mod error;

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dag::Service;

pub use self::error::{Error, ValidationError, ValueInvalidArgs};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq, JsonSchema)]
pub enum Version {
    #[default]
    #[serde(rename = "v1alpha1")]
    V1Alpha1,
}

/// Settings for the generated HTTP listener.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Listener {
    /// Where Envoy writes its access log.
    #[serde(default = "default_access_log_path")]
    pub access_log_path: String,
    /// The bootstrap cluster Envoy fetches routes from.
    #[serde(default = "default_xds_cluster")]
    pub xds_cluster: String,
}

fn default_access_log_path() -> String {
    "/dev/stdout".into()
}

fn default_xds_cluster() -> String {
    "ingress-xds".into()
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            access_log_path: default_access_log_path(),
            xds_cluster: default_xds_cluster(),
        }
    }
}

/// Config is the configuration for a single config generation pass.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub listener: Listener,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Config {
    /// Deserializes and validates a config from `input`.
    pub fn from_reader<R: std::io::Read>(input: R) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_reader(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every service is well formed and declared only once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();

        for (index, service) in self.services.iter().enumerate() {
            let field = |name: &str| format!("services[{index}].{name}");

            if service.name.is_empty() {
                return Err(ValueInvalidArgs {
                    field: field("name"),
                    clarification: Some("cannot be empty".into()),
                    examples: None,
                }
                .into());
            }

            if !(1..=i32::from(u16::MAX)).contains(&service.port) {
                return Err(ValueInvalidArgs {
                    field: field("port"),
                    clarification: Some(format!("{} is not a valid port", service.port)),
                    examples: Some(vec!["80".into(), "443".into(), "8080".into()]),
                }
                .into());
            }

            if let Some(path) = service
                .health_check
                .as_ref()
                .map(|health_check| &health_check.path)
                .filter(|path| !path.is_empty() && !path.starts_with('/'))
            {
                return Err(ValueInvalidArgs {
                    field: field("healthCheck.path"),
                    clarification: Some(format!("{path:?} must be absolute")),
                    examples: Some(vec!["/healthz".into()]),
                }
                .into());
            }

            if !seen.insert((&service.namespace, &service.name, service.port)) {
                return Err(ValidationError::NotUnique(service.display_name()));
            }
        }

        Ok(())
    }
}
