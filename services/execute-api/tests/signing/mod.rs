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

mod live;
mod properties;

use anyhow::Result;
use gatesign_core::time::{parse_iso8601, DateTime};
use gatesign_execute_api::{Credential, RequestDescriptor, SigningContext};
use http::Method;

pub const ENDPOINT: &str = "https://abc123def4.execute-api.us-east-2.amazonaws.com/chat";
pub const REGION: &str = "us-east-2";
pub const ACCESS_KEY_ID: &str = "AKIDEXAMPLE";
pub const SECRET_ACCESS_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
pub const AMZ_DATE: &str = "20240613T154501Z";

/// Fixed inputs shared by the offline signing tests.
pub fn fixture(body: &serde_json::Value) -> Result<(RequestDescriptor, Credential, SigningContext, DateTime)> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = SigningContext::new(ENDPOINT, Some(REGION))?;
    let desc = RequestDescriptor::json(Method::POST, ctx.endpoint(), body)?;
    let cred = Credential::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY);
    let now = parse_iso8601(AMZ_DATE)?;

    Ok((desc, cred, ctx, now))
}
