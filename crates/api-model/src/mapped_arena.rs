// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A `typed_generational_arena::Arena` paired with a name index.
//!
//! Type definitions are looked up by name on every member and parameter reference while building
//! descriptions, so we keep an index from name to slot. The index preserves insertion order, which
//! is also the order in which documents list their classes.

use std::ops;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typed_generational_arena::{Arena, IgnoreGeneration, Index};

pub type SerializableSlab<T> = Arena<T, usize, IgnoreGeneration>;
pub type SerializableSlabIndex<T> = Index<T, usize, IgnoreGeneration>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappedArena<V> {
    values: SerializableSlab<V>,
    map: IndexMap<String, SerializableSlabIndex<V>>,
}

impl<V> MappedArena<V> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_id(&self, key: &str) -> Option<SerializableSlabIndex<V>> {
        self.map.get(key).copied()
    }

    pub fn get_by_key(&self, key: &str) -> Option<&V> {
        self.get_id(key).map(|id| &self[id])
    }

    /// Insert a value under a new key.
    ///
    /// An existing entry is never replaced: the id of the value already stored under `key` is
    /// returned as the error and `value` is dropped.
    pub fn insert(
        &mut self,
        key: &str,
        value: V,
    ) -> Result<SerializableSlabIndex<V>, SerializableSlabIndex<V>> {
        if let Some(existing) = self.get_id(key) {
            return Err(existing);
        }

        let id = self.values.insert(value);
        self.map.insert(key.to_string(), id);
        Ok(id)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.map
            .iter()
            .map(|(key, id)| (key.as_str(), &self.values[*id]))
    }
}

impl<V> Default for MappedArena<V> {
    fn default() -> Self {
        MappedArena {
            values: SerializableSlab::new(),
            map: IndexMap::new(),
        }
    }
}

impl<V> ops::Index<SerializableSlabIndex<V>> for MappedArena<V> {
    type Output = V;

    #[inline]
    fn index(&self, id: SerializableSlabIndex<V>) -> &V {
        &self.values[id]
    }
}
