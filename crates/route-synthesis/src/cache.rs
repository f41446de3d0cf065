// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use regex::Regex;

use crate::descriptor::OperationDescriptor;
use crate::error::RouteError;

/// Synthesized routes and compiled patterns, shared between threads.
///
/// Concurrent first-time writers may both compute a value: the first to insert wins and the
/// others return the winner, so every caller observes the same instance.
#[derive(Debug, Default)]
pub struct RouteCache {
    descriptors: DashMap<String, Arc<Vec<OperationDescriptor>>>,
    patterns: DashMap<String, Arc<Regex>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The descriptors cached under `key`, building them if absent.
    pub fn descriptors(
        &self,
        key: &str,
        build: impl FnOnce() -> Result<Vec<OperationDescriptor>, RouteError>,
    ) -> Result<Arc<Vec<OperationDescriptor>>, RouteError> {
        if let Some(existing) = self.descriptors.get(key) {
            return Ok(existing.clone());
        }

        // No shard lock may be held here: building compiles patterns through this cache
        let built = Arc::new(build()?);
        Ok(insert_if_absent(&self.descriptors, key, built))
    }

    /// The compiled regex for `pattern`.
    pub fn regex(&self, pattern: &str) -> Result<Arc<Regex>, RouteError> {
        if let Some(existing) = self.patterns.get(pattern) {
            return Ok(existing.clone());
        }

        let compiled = Regex::new(pattern).map_err(|e| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        Ok(insert_if_absent(&self.patterns, pattern, Arc::new(compiled)))
    }

    pub fn cached_resources(&self) -> usize {
        self.descriptors.len()
    }

    pub fn cached_patterns(&self) -> usize {
        self.patterns.len()
    }
}

fn insert_if_absent<V: Clone>(map: &DashMap<String, V>, key: &str, value: V) -> V {
    match map.entry(key.to_string()) {
        Entry::Occupied(entry) => entry.get().clone(),
        Entry::Vacant(entry) => entry.insert(value).value().clone(),
    }
}
