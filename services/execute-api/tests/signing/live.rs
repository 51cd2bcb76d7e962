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

use anyhow::Result;
use gatesign_core::OsEnv;
use gatesign_execute_api::{Config, Signer};
use http::Method;
use log::{debug, warn};
use reqwest::Client;
use serde_json::json;
use std::env;

/// Build a signer from env when the live test is enabled.
///
/// - `GATESIGN_EXECUTE_API_TEST=on`
/// - `GATESIGN_ENDPOINT`, `AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
fn init_live_signer() -> Option<Signer> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("GATESIGN_EXECUTE_API_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let cfg = Config::default().from_env(&OsEnv);
    Some(Signer::from_config(&cfg).expect("live test config must be complete"))
}

#[tokio::test]
async fn test_post_chat() -> Result<()> {
    let Some(signer) = init_live_signer() else {
        warn!("GATESIGN_EXECUTE_API_TEST is not set, skipped");
        return Ok(());
    };

    let signed = signer.sign_json(&json!({"Input": "hola"})).await?;
    let req = signed.into_request(Method::POST, signer.context().endpoint().clone())?;
    debug!("signed request: {req:?}");

    let resp = Client::new().execute(req.try_into()?).await?;
    let status = resp.status();
    debug!("response status: {status}, body: {}", resp.text().await?);

    assert!(status.is_success(), "signed request rejected: {status}");
    Ok(())
}
