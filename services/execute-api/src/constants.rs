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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Service identifier signed into every credential scope.
pub const EXECUTE_API_SERVICE: &str = "execute-api";
/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// SigV4 algorithm identifier.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
/// Terminator of every credential scope.
pub const AWS4_REQUEST: &str = "aws4_request";

// Headers used in signing, canonical (lowercase) form.
pub const HOST: &str = "host";
pub const X_AMZ_DATE: &str = "x-amz-date";

// Headers emitted on the signed request, in emission order.
pub const ACCEPT: &str = "Accept";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const X_AMZ_CONTENT_SHA256: &str = "X-Amz-Content-Sha256";
pub const X_AMZ_DATE_HEADER: &str = "X-Amz-Date";
pub const AUTHORIZATION: &str = "Authorization";

pub const ACCEPT_VALUE: &str = "*/*";
pub const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate, br";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Env values used by config and credential providers.
pub const GATESIGN_ENDPOINT: &str = "GATESIGN_ENDPOINT";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - '/' is kept as the path segment separator.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// But used in query.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
