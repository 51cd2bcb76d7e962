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

use bytes::Bytes;
use gatesign_core::time::{format_iso8601, DateTime};
use gatesign_core::{Error, Result};
use http::header::HeaderName;
use http::uri::PathAndQuery;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use serde::Serialize;

/// RequestDescriptor is the part of an HTTP request that gets signed.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// HTTP path, as it appears on the wire.
    pub path: String,
    /// HTTP query parameters, as they appear on the wire (still percent
    /// encoded, `+` for space).
    pub query: Vec<(String, String)>,
    /// Extra headers to sign besides `host` and `x-amz-date`.
    pub headers: HeaderMap,
    /// The exact bytes the transport will send.
    pub body: Bytes,
}

impl RequestDescriptor {
    /// Describe a request to `endpoint` carrying `body`.
    ///
    /// Path and query are taken from the endpoint; an empty path signs as `/`.
    pub fn new(method: Method, endpoint: &Uri, body: impl Into<Bytes>) -> Self {
        let paq = endpoint
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        RequestDescriptor {
            method,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    v.split('&')
                        .filter(|pair| !pair.is_empty())
                        .map(|pair| match pair.split_once('=') {
                            Some((k, v)) => (k.to_string(), v.to_string()),
                            None => (pair.to_string(), String::new()),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Describe a request whose body is `body` serialized as JSON.
    ///
    /// The serialized bytes are what gets hashed and what the signed request
    /// carries, so the transport must send them untouched.
    pub fn json<T: Serialize + ?Sized>(method: Method, endpoint: &Uri, body: &T) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(|e| {
            Error::encoding_failure("request body can't be serialized as json").with_source(e)
        })?;

        Ok(Self::new(method, endpoint, body))
    }

    /// Add a header to be signed.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Push a new query pair into query list.
    ///
    /// `key` and `value` are plain text; they are form encoded before being
    /// stored. The transport must send the same pair.
    pub fn query_push(&mut self, key: &str, value: &str) {
        self.query.push((
            form_urlencoded::byte_serialize(key.as_bytes()).collect(),
            form_urlencoded::byte_serialize(value.as_bytes()).collect(),
        ));
    }
}

/// Timestamp of one signing call.
///
/// Both renderings come from the same instant: `date_stamp` is a slice of
/// `amz_date`, never formatted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    amz_date: String,
}

impl Timestamp {
    /// Capture the renderings of `now`.
    pub fn new(now: DateTime) -> Self {
        Self {
            amz_date: format_iso8601(now),
        }
    }

    /// ISO8601 basic form: `20240613T154501Z`.
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// Date part of [`Timestamp::amz_date`]: `20240613`.
    pub fn date_stamp(&self) -> &str {
        &self.amz_date[..8]
    }
}
