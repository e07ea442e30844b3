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

use serde_json::json;

use crate::codec::prost::struct_from_json;

pub const TLS_INSPECTOR: &str = "envoy.listener.tls_inspector";
pub const HTTP_CONNECTION_MANAGER: &str = "envoy.http_connection_manager";
pub const FILE_ACCESS_LOG: &str = "envoy.file_access_log";

/// HTTP filters installed on every connection manager, in order.
pub const HTTP_FILTERS: &[&str] = &["envoy.gzip", "envoy.grpc_web", "envoy.router"];

/// A filter applied to a listener before a filter chain is selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListenerFilter {
    pub name: String,
    pub config: prost_types::Struct,
}

/// A network filter in a listener's filter chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub name: String,
    pub config: prost_types::Struct,
}

/// Returns a new TLS inspector listener filter.
pub fn tls_inspector() -> ListenerFilter {
    ListenerFilter {
        name: TLS_INSPECTOR.into(),
        config: <_>::default(),
    }
}

/// Creates an HTTP connection manager filter which fetches `route_name`
/// over gRPC from `xds_cluster` and logs requests to `access_log_path`.
pub fn http_connection_manager(
    route_name: &str,
    access_log_path: &str,
    xds_cluster: &str,
) -> Filter {
    let http_filters: Vec<_> = HTTP_FILTERS
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    Filter {
        name: HTTP_CONNECTION_MANAGER.into(),
        config: struct_from_json(json!({
            "stat_prefix": route_name,
            "rds": {
                "route_config_name": route_name,
                "config_source": {
                    "api_config_source": {
                        "api_type": "GRPC",
                        "grpc_services": [
                            { "envoy_grpc": { "cluster_name": xds_cluster } }
                        ],
                    },
                },
            },
            "http_filters": http_filters,
            "use_remote_address": true,
            "access_log": access_log(access_log_path),
        })),
    }
}

fn access_log(path: &str) -> serde_json::Value {
    json!([{
        "name": FILE_ACCESS_LOG,
        "config": { "path": path },
    }])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prost_types::value::Kind;
    use serde_json::json;

    use super::*;
    use crate::codec::prost::struct_to_json;

    #[test]
    fn tls_inspector_is_empty() {
        let filter = tls_inspector();
        assert_eq!("envoy.listener.tls_inspector", filter.name);
        assert!(filter.config.fields.is_empty());
    }

    #[test]
    fn http_connection_manager_tree() {
        let filter = http_connection_manager("ingress_http", "/dev/stdout", "ingress-xds");

        assert_eq!("envoy.http_connection_manager", filter.name);
        assert_eq!(
            json!({
                "stat_prefix": "ingress_http",
                "rds": {
                    "route_config_name": "ingress_http",
                    "config_source": {
                        "api_config_source": {
                            "api_type": "GRPC",
                            "grpc_services": [
                                { "envoy_grpc": { "cluster_name": "ingress-xds" } }
                            ],
                        },
                    },
                },
                "http_filters": [
                    { "name": "envoy.gzip" },
                    { "name": "envoy.grpc_web" },
                    { "name": "envoy.router" },
                ],
                "use_remote_address": true,
                "access_log": [{
                    "name": "envoy.file_access_log",
                    "config": { "path": "/dev/stdout" },
                }],
            }),
            struct_to_json(filter.config)
        );
    }

    #[test]
    fn use_remote_address_is_a_bool() {
        let filter = http_connection_manager("ingress_https", "/var/log/access.log", "xds");

        assert_eq!(
            Some(&Kind::BoolValue(true)),
            filter
                .config
                .fields
                .get("use_remote_address")
                .and_then(|value| value.kind.as_ref())
        );
    }
}
