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

use gatesign_core::hash::hmac_sha256;
use gatesign_core::Result;
use zeroize::Zeroizing;

use crate::constants::AWS4_REQUEST;

/// SigningKey is the output of the SigV4 key derivation chain.
///
/// Scoped to one date, region and service. The bytes are wiped on drop.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Derive the signing key for `date_stamp/region/service/aws4_request`.
///
/// Every step feeds the raw MAC of the previous one as the next key.
pub fn generate_signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<SigningKey> {
    // Sign secret
    let secret = Zeroizing::new(format!("AWS4{secret}"));
    // Sign date
    let sign_date = Zeroizing::new(hmac_sha256(secret.as_bytes(), date_stamp.as_bytes())?);
    // Sign region
    let sign_region = Zeroizing::new(hmac_sha256(&sign_date, region.as_bytes())?);
    // Sign service
    let sign_service = Zeroizing::new(hmac_sha256(&sign_region, service.as_bytes())?);
    // Sign request
    let sign_request = Zeroizing::new(hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())?);

    Ok(SigningKey(sign_request))
}
