// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use gatesign_core::Env;
use log::debug;

use crate::constants::*;

/// Config for execute-api signing.
///
/// The signer never reads the environment on its own: build a `Config`,
/// optionally fill it with [`Config::from_env`], and hand the resolved values
/// to [`SigningContext::from_config`](crate::SigningContext::from_config) or
/// [`Signer::from_config`](crate::Signer::from_config).
#[derive(Clone, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`GATESIGN_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    /// - default to `us-east-1` when building the signing context
    pub region: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.endpoint.is_none() {
            self.endpoint = env.var_non_empty(GATESIGN_ENDPOINT);
        }
        if self.region.is_none() {
            self.region = env
                .var_non_empty(AWS_REGION)
                .or_else(|| env.var_non_empty(AWS_DEFAULT_REGION));
        }
        if self.access_key_id.is_none() {
            self.access_key_id = env.var_non_empty(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var_non_empty(AWS_SECRET_ACCESS_KEY);
        }

        debug!(
            "config loaded from env: endpoint={:?}, region={:?}, access_key_id set: {}",
            self.endpoint,
            self.region,
            self.access_key_id.is_some()
        );
        self
    }

    /// Region with the default applied.
    pub fn region_or_default(&self) -> &str {
        self.region
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }
}
