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

use std::sync::Arc;

use async_trait::async_trait;
use gatesign_core::{Env, OsEnv, ProvideCredential, Result};
use log::debug;

use crate::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY};
use crate::Credential;

/// StaticCredentialProvider always returns the same access key pair.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider for the given access key pair.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            credential: Credential::new(access_key_id, secret_access_key),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

/// EnvCredentialProvider reads the access key pair from env on every call.
///
/// - `AWS_ACCESS_KEY_ID`
/// - `AWS_SECRET_ACCESS_KEY`
///
/// Returns `None` if either is missing or empty.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    env: Arc<dyn Env>,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(OsEnv)
    }
}

impl EnvCredentialProvider {
    /// Create a provider reading from `env`.
    pub fn new(env: impl Env) -> Self {
        Self { env: Arc::new(env) }
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (
            self.env.var_non_empty(AWS_ACCESS_KEY_ID),
            self.env.var_non_empty(AWS_SECRET_ACCESS_KEY),
        ) else {
            debug!("access key pair not found in env");
            return Ok(None);
        };

        Ok(Some(Credential::new(ak, sk)))
    }
}
