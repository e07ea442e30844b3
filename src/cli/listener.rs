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

use serde_json::json;

use crate::{
    codec::prost::struct_to_json,
    envoy::listener::{http_connection_manager, tls_inspector},
    Config,
};

/// Prints the listener filters as JSON.
#[derive(clap::Args, Clone, Debug)]
pub struct Listener {
    /// The route configuration the connection manager requests over RDS.
    #[clap(short, long, default_value = "ingress_http")]
    pub route: String,
}

impl Listener {
    pub fn run(&self, config: &Config, output: &mut impl std::io::Write) -> crate::Result<()> {
        let inspector = tls_inspector();
        let manager = http_connection_manager(
            &self.route,
            &config.listener.access_log_path,
            &config.listener.xds_cluster,
        );
        tracing::debug!(route = %self.route, "rendering listener filters");

        let value = json!({
            "listener_filters": [{
                "name": inspector.name,
                "config": struct_to_json(inspector.config),
            }],
            "filters": [{
                "name": manager.name,
                "config": struct_to_json(manager.config),
            }],
        });

        serde_json::to_writer_pretty(&mut *output, &value)?;
        writeln!(output)?;
        Ok(())
    }
}
