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

use k8s_openapi::{
    api::core::v1::{Service as KubeService, ServicePort, ServiceSpec},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use pretty_assertions::assert_eq;

use ingress_xds::{
    cluster_name,
    config::Config,
    dag::{HealthCheck, Service},
    envoy::{
        cluster::{fingerprint, CLUSTER_NAME_MAX_LEN},
        hashname, truncate,
    },
};

#[test]
fn reference_vectors() {
    assert_eq!("q-a8c5", truncate(6, "quijibo", "a8c5"));
    assert_eq!("a8c5", truncate(4, "quijibo", "a8c5"));
    assert_eq!("", hashname::<&str>(99, &[]));
    assert_eq!("alpha/beta/gamma", hashname(99, &["alpha", "beta", "gamma"]));
    assert_eq!("ga-edf159/betabeta", hashname(19, &["gammagamma", "betabeta"]));
    assert_eq!(
        "default/backend/80/da39a3ee5e",
        cluster_name(&Service::new("default", "backend", 80))
    );
}

#[test]
fn configured_service_keeps_identity() {
    let plain = Service::new("default", "backend", 80);
    let configured = plain
        .clone()
        .with_load_balancer_strategy("Maglev")
        .with_health_check(HealthCheck {
            path: "/healthz".into(),
            interval_seconds: 5,
            timeout_seconds: 30,
            unhealthy_threshold_count: 3,
            healthy_threshold_count: 1,
        });

    assert_eq!("default/backend/80/1565a9d7f1", cluster_name(&configured));
    assert!(cluster_name(&configured).starts_with("default/backend/80/"));
    assert_ne!(fingerprint(&plain), fingerprint(&configured));
}

#[test]
fn kubernetes_service_ports() {
    let service = KubeService {
        metadata: ObjectMeta {
            namespace: Some("it-is-a-truth-universally-acknowledged".into()),
            name: Some("must-be-in-want-of-a-wife".into()),
            ..<_>::default()
        },
        spec: Some(ServiceSpec {
            ports: Some(vec![
                ServicePort {
                    port: 80,
                    ..<_>::default()
                },
                ServicePort {
                    port: 443,
                    ..<_>::default()
                },
            ]),
            ..<_>::default()
        }),
        ..<_>::default()
    };

    let names: Vec<_> = Service::all_from_k8s(&service)
        .iter()
        .map(cluster_name)
        .collect();

    assert_eq!(2, names.len());
    for name in &names {
        assert!(name.len() <= CLUSTER_NAME_MAX_LEN, "{name}");
    }
    // Same identity, so the truncated prefix is shared across ports.
    let prefix = |name: &str| name.splitn(3, '/').take(2).collect::<Vec<_>>().join("/");
    assert_eq!(prefix(&names[0]), prefix(&names[1]));
    assert!(names[0].contains("/80/"));
    assert!(names[1].contains("/443/"));
}

#[test]
fn names_from_config_file() {
    let yaml = "
services:
  - { namespace: default, name: backend, port: 80 }
  - { namespace: default, name: backend, port: 80, loadBalancerStrategy: Random }
  - { namespace: default, name: backend, port: 80, loadBalancerStrategy: Maglev }
";
    let config = Config::from_reader(yaml.as_bytes());

    // The same identity three times is rejected before any name is produced.
    assert!(config.is_err());

    let yaml = "
services:
  - { namespace: default, name: backend, port: 80 }
  - { namespace: default, name: backend, port: 8080, loadBalancerStrategy: Random }
";
    let config = Config::from_reader(yaml.as_bytes()).unwrap();
    let clusters = ingress_xds::cli::clusters(&config.services);

    assert_eq!(2, clusters.len());
    assert_eq!("default/backend/80/da39a3ee5e", clusters[0].cluster);
    assert!(clusters[1].cluster.starts_with("default/backend/8080/"));
}
