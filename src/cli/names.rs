/*
 * Copyright 2022 Google LLC
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

use serde::Serialize;

use crate::{dag::Service, envoy::cluster::cluster_name, Config};

/// Prints the Envoy cluster name of every configured service.
#[derive(clap::Args, Clone, Debug)]
pub struct Names {
    /// The output format.
    #[clap(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// A service and the cluster generated for it.
#[derive(Clone, Debug, Serialize, Eq, PartialEq)]
pub struct NamedCluster {
    pub namespace: String,
    pub name: String,
    pub port: i32,
    pub cluster: String,
}

/// Names every service, in order.
pub fn clusters(services: &[Service]) -> Vec<NamedCluster> {
    services
        .iter()
        .map(|service| {
            let cluster = cluster_name(service);
            tracing::debug!(service = %service.display_name(), %cluster, "generated cluster name");

            let readable = format!("{}/{}/{}/", service.namespace, service.name, service.port);
            if !cluster.starts_with(&readable) {
                tracing::trace!(
                    service = %service.display_name(),
                    %cluster,
                    "service identity truncated"
                );
            }

            NamedCluster {
                namespace: service.namespace.clone(),
                name: service.name.clone(),
                port: service.port,
                cluster,
            }
        })
        .collect()
}

impl Names {
    pub fn run(&self, config: &Config, output: &mut impl std::io::Write) -> crate::Result<()> {
        let clusters = clusters(&config.services);
        tracing::info!(count = clusters.len(), "generated cluster names");

        match self.format {
            Format::Yaml => serde_yaml::to_writer(&mut *output, &clusters)?,
            Format::Json => {
                serde_json::to_writer_pretty(&mut *output, &clusters)?;
                writeln!(output)?;
            }
        }

        Ok(())
    }
}
