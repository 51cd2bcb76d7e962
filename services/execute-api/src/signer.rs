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

use gatesign_core::time::{now, DateTime};
use gatesign_core::{Error, ProvideCredential, Result};
use http::Method;
use serde::Serialize;

use crate::sign_request::sign;
use crate::{
    Config, Credential, RequestDescriptor, SignedRequest, SigningContext,
    StaticCredentialProvider,
};

/// Signer pairs a signing context with a credential provider.
///
/// A credential is requested from the provider on every call and dropped
/// once the request is signed. Nothing is cached.
#[derive(Debug, Clone)]
pub struct Signer {
    ctx: SigningContext,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,

    time: Option<DateTime>,
}

impl Signer {
    /// Create a new signer.
    pub fn new(
        ctx: SigningContext,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),

            time: None,
        }
    }

    /// Create a signer from resolved config.
    ///
    /// Requires `endpoint`, `access_key_id` and `secret_access_key`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let ctx = SigningContext::from_config(cfg)?;
        let (Some(ak), Some(sk)) = (
            cfg.access_key_id.as_deref(),
            cfg.secret_access_key.as_deref(),
        ) else {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key are required for signing",
            ));
        };

        Ok(Self::new(ctx, StaticCredentialProvider::new(ak, sk)))
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The signing context of this signer.
    pub fn context(&self) -> &SigningContext {
        &self.ctx
    }

    /// Sign a `POST` to the endpoint carrying `body` as JSON.
    pub async fn sign_json<T: Serialize + ?Sized>(&self, body: &T) -> Result<SignedRequest> {
        self.sign_json_with_method(Method::POST, body).await
    }

    /// Sign a request to the endpoint carrying `body` as JSON.
    pub async fn sign_json_with_method<T: Serialize + ?Sized>(
        &self,
        method: Method,
        body: &T,
    ) -> Result<SignedRequest> {
        let desc = RequestDescriptor::json(method, self.ctx.endpoint(), body)?;
        self.sign_request(&desc).await
    }

    /// Sign a pre-built request descriptor.
    pub async fn sign_request(&self, desc: &RequestDescriptor) -> Result<SignedRequest> {
        let cred = self
            .provider
            .provide_credential()
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential provided"))?;

        sign(desc, &cred, &self.ctx, self.time.unwrap_or_else(now))
    }
}
