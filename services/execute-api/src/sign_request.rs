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

use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use gatesign_core::hash::hex_hmac_sha256;
use gatesign_core::time::DateTime;
use gatesign_core::utils::Redact;
use gatesign_core::{Error, Result, SigningCredential};
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, Method, Request, Uri};
use log::debug;

use crate::canonical::{self, canonical_request, credential_scope};
use crate::constants::*;
use crate::key::generate_signing_key;
use crate::{Credential, RequestDescriptor, SigningContext, Timestamp};

/// SignedRequest holds everything the transport needs to send a signed call.
///
/// Immutable once produced. Headers keep their emission order:
/// `Accept`, `Accept-Encoding`, `Content-Type`, `X-Amz-Content-Sha256`,
/// `X-Amz-Date`, `Authorization`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    headers: Vec<(&'static str, String)>,
    signature: String,
    body: Bytes,
}

impl SignedRequest {
    /// Headers in emission order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Get header value by name, case insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> &str {
        self.header(AUTHORIZATION).unwrap_or_default()
    }

    /// Hex encoded signature embedded in the `Authorization` header.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The body exactly as hashed.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Convert headers into a [`HeaderMap`].
    ///
    /// `Authorization` is marked sensitive.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers.iter() {
            let mut value = HeaderValue::from_str(value)?;
            if *name == AUTHORIZATION {
                value.set_sensitive(true);
            }
            map.insert(HeaderName::from_bytes(name.as_bytes())?, value);
        }

        Ok(map)
    }

    /// Build an HTTP request ready to hand to a transport.
    pub fn into_request(self, method: Method, uri: Uri) -> Result<Request<Bytes>> {
        let headers = self.to_header_map()?;
        let mut req = Request::builder().method(method).uri(uri).body(self.body)?;
        *req.headers_mut() = headers;

        Ok(req)
    }
}

impl Debug for SignedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, String)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if *k == AUTHORIZATION {
                    (*k, format!("{:?}", Redact::from(v)))
                } else {
                    (*k, v.clone())
                }
            })
            .collect();

        f.debug_struct("SignedRequest")
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Sign `desc` with SigV4 at instant `now`.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html)
///
/// The call is pure: same inputs, same output. Any failure aborts the whole
/// call and no partial signature is returned.
pub fn sign(
    desc: &RequestDescriptor,
    cred: &Credential,
    ctx: &SigningContext,
    now: DateTime,
) -> Result<SignedRequest> {
    if !cred.is_valid() {
        return Err(Error::credential_invalid(
            "access key id and secret access key must not be empty",
        ));
    }

    let ts = Timestamp::new(now);

    // build canonical request and string to sign.
    let creq = canonical_request(desc, ctx, &ts)?;
    let scope = credential_scope(&ts, ctx);
    debug!("calculated scope: {scope}");
    let string_to_sign = canonical::string_to_sign(&ts, &scope, &creq)?;

    let signature = {
        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            ts.date_stamp(),
            ctx.region(),
            ctx.service(),
        )?;
        hex_hmac_sha256(signing_key.as_bytes(), string_to_sign.as_bytes())?
    };

    let authorization = format!(
        "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
        cred.access_key_id,
        creq.signed_headers(),
    );

    Ok(SignedRequest {
        headers: vec![
            (ACCEPT, ACCEPT_VALUE.to_string()),
            (ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE.to_string()),
            (CONTENT_TYPE, CONTENT_TYPE_JSON.to_string()),
            (X_AMZ_CONTENT_SHA256, creq.payload_hash().to_string()),
            (X_AMZ_DATE_HEADER, ts.amz_date().to_string()),
            (AUTHORIZATION, authorization),
        ],
        signature,
        body: desc.body.clone(),
    })
}
