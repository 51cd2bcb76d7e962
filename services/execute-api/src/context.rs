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

use std::str::FromStr;

use gatesign_core::Error;
use gatesign_core::Result;
use http::uri::Authority;
use http::Uri;

use crate::constants::{DEFAULT_REGION, EXECUTE_API_SERVICE};
use crate::Config;

/// SigningContext carries the resolved target of a signing call.
///
/// The service is always `execute-api`; the region falls back to `us-east-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    region: String,
    service: String,
    endpoint: Uri,
    host: String,
}

impl SigningContext {
    /// Create a signing context for `endpoint` in `region`.
    ///
    /// Returns [`ErrorKind::InvalidEndpoint`](gatesign_core::ErrorKind::InvalidEndpoint)
    /// if the URL can't be parsed, isn't `http`/`https` or has no host.
    pub fn new(endpoint: &str, region: Option<&str>) -> Result<Self> {
        let endpoint = Uri::from_str(endpoint)?;
        Self::from_uri(endpoint, region)
    }

    /// Create a signing context from an already parsed endpoint.
    pub fn from_uri(endpoint: Uri, region: Option<&str>) -> Result<Self> {
        let default_port = match endpoint.scheme_str() {
            Some("https") => 443,
            Some("http") => 80,
            _ => {
                return Err(Error::invalid_endpoint(format!(
                    "endpoint {endpoint} must be an absolute http or https url"
                )))
            }
        };
        let host = endpoint
            .authority()
            .map(|authority| canonical_host(authority, default_port))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::invalid_endpoint(format!("endpoint {endpoint} has no host to sign"))
            })?;
        let region = region
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        Ok(Self {
            region,
            service: EXECUTE_API_SERVICE.to_string(),
            endpoint,
            host,
        })
    }

    /// Create a signing context from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let endpoint = cfg
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::config_invalid("endpoint is required for signing"))?;

        Self::new(endpoint, Some(cfg.region_or_default()))
    }

    /// Override the service name.
    ///
    /// Only used to replay AWS published vectors which target other services.
    #[cfg(test)]
    pub(crate) fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Region signed into the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service signed into the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The endpoint this context was built from.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Value of the `host` header: host, plus `:port` if the URL spells out a
    /// port other than the scheme's default.
    pub fn host(&self) -> &str {
        &self.host
    }
}

fn canonical_host(authority: &Authority, default_port: u16) -> String {
    let host = authority.host().to_lowercase();
    match authority.port_u16() {
        Some(port) if port != default_port => format!("{host}:{port}"),
        _ => host,
    }
}
