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

use super::{fixture, ACCESS_KEY_ID, AMZ_DATE, REGION};
use anyhow::Result;
use bytes::Bytes;
use gatesign_core::hash::{hex_sha256, EMPTY_SHA256};
use gatesign_core::time::parse_rfc3339;
use gatesign_core::ErrorKind;
use gatesign_execute_api::{
    canonical_request, credential_scope, sign, RequestDescriptor, SigningContext, Timestamp,
};
use http::header::HeaderName;
use http::{HeaderValue, Method};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_chat_reference_signature() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "hola"}))?;
    let signed = sign(&desc, &cred, &ctx, now)?;

    assert_eq!(
        signed.headers().collect::<Vec<_>>(),
        vec![
            ("Accept", "*/*"),
            ("Accept-Encoding", "gzip, deflate, br"),
            ("Content-Type", "application/json"),
            (
                "X-Amz-Content-Sha256",
                "747503dc7b26f864a475b2cf1ddc06152bc996e83a81059c8cc5cbb570b381a6"
            ),
            ("X-Amz-Date", "20240613T154501Z"),
            (
                "Authorization",
                "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240613/us-east-2/execute-api/aws4_request, \
                 SignedHeaders=host;x-amz-date, \
                 Signature=97daeb890fa3bd5fb63e4d212514993dc5ab83414910390bda92e039220d1332"
            ),
        ]
    );
    assert_eq!(signed.body(), &Bytes::from_static(br#"{"Input":"hola"}"#));
    Ok(())
}

#[test]
fn test_empty_object_reference_signature() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({}))?;
    let signed = sign(&desc, &cred, &ctx, now)?;

    assert_eq!(
        signed.header("x-amz-content-sha256"),
        Some("44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a")
    );
    assert_eq!(
        signed.signature(),
        "498a7f940922e9b75a32ef4412654d275d63f3b02961213235ae328e628dae32"
    );
    Ok(())
}

#[test]
fn test_deterministic() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "hola"}))?;

    let first = sign(&desc, &cred, &ctx, now)?;
    for _ in 0..8 {
        assert_eq!(sign(&desc, &cred, &ctx, now)?, first);
    }
    Ok(())
}

#[test]
fn test_empty_body_payload_hash() -> Result<()> {
    let (mut desc, cred, ctx, now) = fixture(&json!({}))?;
    desc.body = Bytes::new();

    let signed = sign(&desc, &cred, &ctx, now)?;
    assert_eq!(signed.header("X-Amz-Content-Sha256"), Some(EMPTY_SHA256));
    assert_eq!(
        EMPTY_SHA256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    Ok(())
}

#[test]
fn test_single_byte_flip_changes_signature() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "hola"}))?;
    let base = sign(&desc, &cred, &ctx, now)?;

    for idx in 0..desc.body.len() {
        let mut body = desc.body.to_vec();
        body[idx] ^= 0x01;
        let flipped = RequestDescriptor {
            body: Bytes::from(body),
            ..desc.clone()
        };
        let signed = sign(&flipped, &cred, &ctx, now)?;

        assert_ne!(
            signed.header("X-Amz-Content-Sha256"),
            base.header("X-Amz-Content-Sha256"),
            "payload hash must change when byte {idx} flips"
        );
        assert_ne!(signed.signature(), base.signature());
    }

    // A known flip: "hola" -> "Hola".
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "Hola"}))?;
    let signed = sign(&desc, &cred, &ctx, now)?;
    assert_eq!(
        signed.header("X-Amz-Content-Sha256"),
        Some("c840579baccacb11fb91e0a0608bf43432db28bd8b8c7c964a6db16afbec53cf")
    );
    assert_eq!(
        signed.signature(),
        "a417309d4d44365d03c4f819e0fa1c240b04b5f0fe4734b63d5c492c4f802c8f"
    );
    Ok(())
}

#[test]
fn test_signed_headers_sorted_and_hashed() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "hola"}))?;
    let desc = desc
        .with_header(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_static("key"),
        )
        .with_header(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        );

    let signed = sign(&desc, &cred, &ctx, now)?;
    let signed_headers = signed
        .authorization()
        .split(", ")
        .find_map(|v| v.strip_prefix("SignedHeaders="))
        .expect("authorization must carry signed headers");
    assert_eq!(signed_headers, "content-type;host;x-amz-date;x-api-key");

    let creq = canonical_request(&desc, &ctx, &Timestamp::new(now))?;
    assert_eq!(creq.signed_headers(), signed_headers);
    let hashed: Vec<&str> = creq
        .as_str()
        .lines()
        .skip(3)
        .take_while(|l| !l.is_empty())
        .map(|l| l.split_once(':').map(|(k, _)| k).unwrap_or(l))
        .collect();
    assert_eq!(hashed.join(";"), signed_headers);
    Ok(())
}

#[test]
fn test_timestamp_consistency() -> Result<()> {
    let (desc, cred, ctx, _) = fixture(&json!({"Input": "hola"}))?;

    for instant in [
        "2024-06-13T15:45:01.999Z",
        "2023-12-31T23:59:59.999Z",
        "2024-02-29T00:00:00Z",
    ] {
        let now = parse_rfc3339(instant)?;
        let ts = Timestamp::new(now);
        assert_eq!(ts.date_stamp(), &ts.amz_date()[..8]);

        let signed = sign(&desc, &cred, &ctx, now)?;
        let amz_date = signed.header("X-Amz-Date").expect("date must be set");
        assert_eq!(amz_date, ts.amz_date());
        assert!(signed.authorization().contains(&format!(
            "Credential={ACCESS_KEY_ID}/{}/{REGION}/execute-api/aws4_request",
            &amz_date[..8]
        )));
        assert_eq!(
            credential_scope(&ts, &ctx),
            format!("{}/{REGION}/execute-api/aws4_request", ts.date_stamp())
        );
    }
    Ok(())
}

#[test]
fn test_amz_date_format() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({}))?;
    let signed = sign(&desc, &cred, &ctx, now)?;

    let amz_date = signed.header("X-Amz-Date").expect("date must be set");
    assert_eq!(amz_date, AMZ_DATE);
    assert_eq!(amz_date.len(), 16);
    assert!(!amz_date.contains(['-', ':', '.']));
    Ok(())
}

#[test]
fn test_query_and_method_are_signed() -> Result<()> {
    let (_, cred, _, now) = fixture(&json!({}))?;
    let ctx = SigningContext::new(
        "https://abc123def4.execute-api.us-east-2.amazonaws.com/prod/chat?lang=es&b=2",
        Some(REGION),
    )?;
    let post = RequestDescriptor::json(Method::POST, ctx.endpoint(), &json!({}))?;
    let put = RequestDescriptor::json(Method::PUT, ctx.endpoint(), &json!({}))?;

    let creq = canonical_request(&post, &ctx, &Timestamp::new(now))?;
    let mut lines = creq.as_str().lines();
    assert_eq!(lines.next(), Some("POST"));
    assert_eq!(lines.next(), Some("/prod/chat"));
    assert_eq!(lines.next(), Some("b=2&lang=es"));

    assert_ne!(
        sign(&post, &cred, &ctx, now)?.signature(),
        sign(&put, &cred, &ctx, now)?.signature()
    );
    Ok(())
}

#[test]
fn test_payload_hash_matches_body() -> Result<()> {
    let (desc, cred, ctx, now) = fixture(&json!({"Input": "¿qué pasó en 1492?"}))?;
    let signed = sign(&desc, &cred, &ctx, now)?;

    assert_eq!(
        signed.header("X-Amz-Content-Sha256"),
        Some(hex_sha256(signed.body()).as_str())
    );
    Ok(())
}

#[test]
fn test_invalid_endpoint() {
    let err = SigningContext::new("chat", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
}
