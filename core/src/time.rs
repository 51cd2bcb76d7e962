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

//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime from the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO8601 basic form: `20220313T072004Z`
///
/// Sub-second precision is dropped.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse time from ISO8601 basic form: `20220313T072004Z`
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ")
        .map_err(|e| Error::unexpected(format!("parse {s} as iso8601 failed")).with_source(e))?;

    Ok(t.and_utc())
}

/// Parse time from RFC3339: `2022-03-13T07:20:04Z`
pub fn parse_rfc3339(s: &str) -> crate::Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| Error::unexpected(format!("parse {s} as rfc3339 failed")).with_source(e))?;

    Ok(t.with_timezone(&Utc))
}
