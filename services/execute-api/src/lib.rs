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

//! AWS SigV4 signer for API Gateway `execute-api` endpoints.
//!
//! ## Example
//!
//! ```
//! use gatesign_core::time::parse_iso8601;
//! use gatesign_execute_api::{sign, Credential, RequestDescriptor, SigningContext};
//! use http::Method;
//!
//! # fn main() -> gatesign_core::Result<()> {
//! let ctx = SigningContext::new(
//!     "https://abc123def4.execute-api.us-east-2.amazonaws.com/chat",
//!     Some("us-east-2"),
//! )?;
//! let desc = RequestDescriptor::json(
//!     Method::POST,
//!     ctx.endpoint(),
//!     &serde_json::json!({"Input": "hola"}),
//! )?;
//! let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
//!
//! let signed = sign(&desc, &cred, &ctx, parse_iso8601("20240613T154501Z")?)?;
//! assert_eq!(signed.header("X-Amz-Date"), Some("20240613T154501Z"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! The service is fixed to `execute-api` and only long-term access keys are
//! supported: no session tokens are signed.

mod constants;
pub use constants::{DEFAULT_REGION, EXECUTE_API_SERVICE};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, StaticCredentialProvider};

mod context;
pub use context::SigningContext;

mod request;
pub use request::{RequestDescriptor, Timestamp};

mod key;
pub use key::{generate_signing_key, SigningKey};

mod canonical;
pub use canonical::{canonical_request, credential_scope, string_to_sign, CanonicalRequest};

mod sign_request;
pub use sign_request::{sign, SignedRequest};

mod signer;
pub use signer::Signer;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Config>();
        assert_send_sync::<Credential>();
        assert_send_sync::<EnvCredentialProvider>();
        assert_send_sync::<StaticCredentialProvider>();
        assert_send_sync::<SigningContext>();
        assert_send_sync::<RequestDescriptor>();
        assert_send_sync::<Timestamp>();
        assert_send_sync::<SigningKey>();
        assert_send_sync::<CanonicalRequest>();
        assert_send_sync::<SignedRequest>();
        assert_send_sync::<Signer>();
    }
}
