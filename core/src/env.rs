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

use std::collections::HashMap;
use std::fmt::Debug;

/// Env provides access to environment variables.
///
/// Configuration is read through this trait instead of `std::env` so that
/// callers decide where values come from and tests never touch the process
/// environment.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// Returns `None` when the variable is unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Get an environment variable, treating an empty value as unset.
    fn var_non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// StaticEnv provides a fixed set of environment variables.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Variables visible through this env.
    pub envs: HashMap<String, String>,
}

impl StaticEnv {
    /// Build a StaticEnv from key value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            envs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}
