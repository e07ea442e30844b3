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

use serde_json::Value;

use super::hashname::{content_hash, hashname};
use crate::dag::{HealthCheck, Service};

/// The digest used to fingerprint a service's non-identity configuration.
pub type ConfigDigest = sha1::Sha1;

/// Budget for the `namespace/name` part of a cluster name: 15 bytes each
/// plus the separator.
pub const IDENTITY_MAX_LEN: usize = 31;

/// Upper bound on the length of a generated cluster name: the identity,
/// an 11 byte port at most, the fingerprint and two separators fit with
/// room to spare.
pub const CLUSTER_NAME_MAX_LEN: usize = 60;

/// Number of hex characters of [`ConfigDigest`] kept in a cluster name.
pub const FINGERPRINT_LEN: usize = 10;

/// Returns the Envoy cluster name for `service`.
///
/// The name has the form `namespace/name/port/fingerprint`. Namespace and
/// name are hash-truncated to fit [`IDENTITY_MAX_LEN`] and depend on
/// nothing else. The fingerprint covers the load balancer strategy and
/// health check so services that differ only in those settings still map
/// to distinct clusters.
pub fn cluster_name(service: &Service) -> String {
    let identity = hashname(IDENTITY_MAX_LEN, &[&service.namespace, &service.name]);

    format!("{identity}/{}/{}", service.port, fingerprint(service))
}

/// The first [`FINGERPRINT_LEN`] hex characters of the digest of
/// [`canonical_config`].
pub fn fingerprint(service: &Service) -> String {
    let mut hash = content_hash::<ConfigDigest>(canonical_config(service));
    hash.truncate(FINGERPRINT_LEN);
    hash
}

/// Renders the non-identity configuration of `service` as a single string.
///
/// The fields render as a compact JSON array in this order: load balancer
/// strategy, health check timeout, interval, unhealthy threshold, healthy
/// threshold and path. Durations render as `1h2m3s` style strings. Unset
/// (empty or zero) fields render as `null` in their slot, and a service
/// with no configuration at all renders as the empty string.
pub fn canonical_config(service: &Service) -> String {
    let unset = HealthCheck::default();
    let HealthCheck {
        path,
        interval_seconds,
        timeout_seconds,
        unhealthy_threshold_count,
        healthy_threshold_count,
    } = service.health_check.as_ref().unwrap_or(&unset);

    let fields = [
        Value::from(non_empty(service.load_balancer_strategy.as_deref())),
        Value::from((*timeout_seconds > 0).then(|| duration_string(*timeout_seconds))),
        Value::from((*interval_seconds > 0).then(|| duration_string(*interval_seconds))),
        Value::from((*unhealthy_threshold_count > 0).then_some(*unhealthy_threshold_count)),
        Value::from((*healthy_threshold_count > 0).then_some(*healthy_threshold_count)),
        Value::from(non_empty(Some(path.as_str()))),
    ];

    if fields.iter().all(Value::is_null) {
        return String::new();
    }

    Value::Array(fields.into()).to_string()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Formats a positive number of seconds with only the leading units that
/// are needed: `45s`, `1m30s`, `2h0m5s`.
fn duration_string(seconds: i64) -> String {
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
