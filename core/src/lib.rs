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

//! Core components for signing `execute-api` requests.
//!
//! This crate provides the service independent building blocks used by
//! `gatesign-execute-api`:
//!
//! - [`hash`]: SHA256 digest and HMAC-SHA256 primitives
//! - [`time`]: timestamp capture and the SigV4 renderings of it
//! - [`utils`]: general utilities including data redaction
//! - [`Env`]: environment variable access, with [`OsEnv`] and [`StaticEnv`]
//! - [`ProvideCredential`] and [`SigningCredential`]: the credential seams
//! - [`Error`]: the error type shared by every gatesign crate
//!
//! ## Example
//!
//! ```
//! use gatesign_core::hash::{hex_hmac_sha256, hex_sha256};
//!
//! assert_eq!(
//!     hex_sha256(b""),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! let mac = hex_hmac_sha256(b"key", b"message").unwrap();
//! assert_eq!(mac.len(), 64);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};
