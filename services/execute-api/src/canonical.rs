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

use std::fmt::Write;

use gatesign_core::hash::hex_sha256;
use gatesign_core::Result;
use log::debug;
use percent_encoding::{percent_decode, percent_encode, utf8_percent_encode};

use crate::constants::{
    AWS4_HMAC_SHA256, AWS4_REQUEST, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, HOST, X_AMZ_DATE,
};
use crate::{RequestDescriptor, SigningContext, Timestamp};

/// CanonicalRequest is the normalized form of a request that gets hashed.
///
/// Keeps the pieces the authorization header needs so they always match
/// what went into the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    canonical: String,
    signed_headers: Vec<String>,
    payload_hash: String,
}

impl CanonicalRequest {
    /// The canonical request string.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Signed header names, lowercase and sorted.
    pub fn signed_header_names(&self) -> &[String] {
        &self.signed_headers
    }

    /// Signed header names joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.signed_headers.join(";")
    }

    /// Hex encoded SHA256 of the body.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }
}

/// Build the canonical request:
///
/// ```text
/// POST
/// /chat
///
/// host:abc123def4.execute-api.us-east-2.amazonaws.com
/// x-amz-date:20240613T154501Z
///
/// host;x-amz-date
/// <hex sha256 of body>
/// ```
pub fn canonical_request(
    desc: &RequestDescriptor,
    ctx: &SigningContext,
    ts: &Timestamp,
) -> Result<CanonicalRequest> {
    let headers = canonical_headers(desc, ctx, ts)?;
    let signed_headers: Vec<String> = headers.iter().map(|(k, _)| k.clone()).collect();
    let payload_hash = hex_sha256(&desc.body);

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", desc.method.as_str().to_ascii_uppercase())?;
    // Insert encoded path
    writeln!(f, "{}", canonical_uri(&desc.path))?;
    // Insert query
    writeln!(f, "{}", canonical_query_string(&desc.query))?;
    // Insert signed headers
    for (name, value) in headers.iter() {
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    write!(f, "{payload_hash}")?;

    debug!("calculated canonical request: {f}");
    Ok(CanonicalRequest {
        canonical: f,
        signed_headers,
        payload_hash,
    })
}

/// Build the string to sign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20240613T154501Z
/// 20240613/us-east-2/execute-api/aws4_request
/// <hex sha256 of canonical request>
/// ```
pub fn string_to_sign(ts: &Timestamp, scope: &str, creq: &CanonicalRequest) -> Result<String> {
    let mut f = String::with_capacity(128);
    writeln!(f, "{AWS4_HMAC_SHA256}")?;
    writeln!(f, "{}", ts.amz_date())?;
    writeln!(f, "{scope}")?;
    write!(f, "{}", hex_sha256(creq.as_str().as_bytes()))?;

    debug!("calculated string to sign: {f}");
    Ok(f)
}

/// Scope: `20240613/<region>/<service>/aws4_request`
pub fn credential_scope(ts: &Timestamp, ctx: &SigningContext) -> String {
    format!(
        "{}/{}/{}/{AWS4_REQUEST}",
        ts.date_stamp(),
        ctx.region(),
        ctx.service()
    )
}

/// Encode the wire path with the SigV4 URI set.
///
/// Existing `%XX` escapes are kept with their hex uppercased, so `%2F` never
/// turns into a path separator. A `%` that starts no escape becomes `%25`.
/// Trailing slashes survive; an empty path becomes `/`.
fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut f = String::with_capacity(path.len());
    let mut parts = path.split('%');
    if let Some(head) = parts.next() {
        f.extend(utf8_percent_encode(head, &AWS_URI_ENCODE_SET));
    }
    for part in parts {
        match part.get(..2) {
            Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                f.push('%');
                f.push_str(&hex.to_ascii_uppercase());
                f.extend(utf8_percent_encode(&part[2..], &AWS_URI_ENCODE_SET));
            }
            _ => {
                f.push_str("%25");
                f.extend(utf8_percent_encode(part, &AWS_URI_ENCODE_SET));
            }
        }
    }
    f
}

/// Decode every raw key and value to bytes, encode them again with the
/// SigV4 query set, then sort by key and value.
fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut query: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (query_component_encode(k), query_component_encode(v)))
        .collect();
    query.sort();

    query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// `+` is a form encoded space. Bytes that aren't utf-8 pass through as is.
fn query_component_encode(raw: &str) -> String {
    let bytes: Vec<u8> = raw
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    let decoded: Vec<u8> = percent_decode(&bytes).collect();

    percent_encode(&decoded, &AWS_QUERY_ENCODE_SET).to_string()
}

/// Collect signed headers as sorted `(lowercase name, normalized value)`.
///
/// `host` and `x-amz-date` always come from the context and timestamp.
/// Repeated headers are joined with `,` in their original order.
fn canonical_headers(
    desc: &RequestDescriptor,
    ctx: &SigningContext,
    ts: &Timestamp,
) -> Result<Vec<(String, String)>> {
    let mut headers = Vec::with_capacity(desc.headers.keys_len() + 2);

    for name in desc.headers.keys() {
        let name = name.as_str();
        if name == HOST || name == X_AMZ_DATE {
            continue;
        }

        let mut values = Vec::new();
        for value in desc.headers.get_all(name) {
            values.push(header_value_normalize(value.to_str()?));
        }
        headers.push((name.to_string(), values.join(",")));
    }
    headers.push((HOST.to_string(), ctx.host().to_string()));
    headers.push((X_AMZ_DATE.to_string(), ts.amz_date().to_string()));

    // Sort via header name.
    headers.sort();
    Ok(headers)
}

/// Trim the value and collapse inner whitespace runs into one space.
fn header_value_normalize(v: &str) -> String {
    v.split_whitespace().collect::<Vec<_>>().join(" ")
}
