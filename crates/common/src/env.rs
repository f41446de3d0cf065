// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Read-only access to configuration values.
//!
//! Synthesis never reads `std::env` directly; it receives a `&dyn Environment` so that tests (and
//! embedders) can supply values without touching the process environment.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }

    /// Comma separated values. Blank entries are skipped.
    fn get_list(&self, key: &str, default_value: &[&str]) -> Vec<String> {
        match self.get(key) {
            Some(value) => value
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
            None => default_value.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn get_number<T: FromStr>(&self, key: &str, default_value: T) -> Result<T, EnvError>
    where
        Self: Sized,
    {
        get_number(self, key, default_value)
    }
}

/// Object-safe form of [`Environment::get_number`].
pub fn get_number<T: FromStr>(
    env: &(impl Environment + ?Sized),
    key: &str,
    default_value: T,
) -> Result<T, EnvError> {
    match env.get(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| EnvError::InvalidNumber {
                key: key.to_string(),
                value,
            }),
        None => Ok(default_value),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected a non-negative number")]
    InvalidNumber { key: String, value: String },

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidValue {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, optionally layered over another one.
#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    fallback: Option<Arc<dyn Environment>>,
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|fb| fb.get(key)))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fallback: None,
        }
    }
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_fallback(fallback: Arc<dyn Environment>) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
