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

//! Builders for the Envoy resources handed to the xDS server.
//!
//! Envoy diffs resources by name between pushes, so every name produced
//! here is a pure function of its inputs.

pub mod cluster;
pub mod hashname;
pub mod listener;

pub use self::{
    cluster::cluster_name,
    hashname::{hashname, truncate},
};
