// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use url::Url;

use crate::env::{EnvError, Environment, get_number};
use crate::env_const::{
    HYDRO_BASE_URI, HYDRO_LINKED_DATA_MEDIA_TYPES, HYDRO_MAX_DESCRIBED_TYPES,
    HYDRO_MAX_TYPE_DEPTH, HYDRO_PLAIN_MEDIA_TYPES, HYDRO_PROFILES,
};

pub const DEFAULT_BASE_URI: &str = "http://localhost:8080/";

pub const DEFAULT_MAX_TYPE_DEPTH: usize = 64;
pub const DEFAULT_MAX_DESCRIBED_TYPES: usize = 4096;

pub const DEFAULT_LINKED_DATA_MEDIA_TYPES: [&str; 3] =
    ["application/ld+json", "text/turtle", "application/rdf+xml"];
pub const DEFAULT_PLAIN_MEDIA_TYPES: [&str; 3] =
    ["application/json", "application/xml", "text/xml"];

/// Bounds applied while walking a type graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisLimits {
    /// Maximum nesting of member types below the type being described
    pub max_depth: usize,
    /// Maximum number of distinct types described by a single synthesis
    pub max_types: usize,
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_TYPE_DEPTH,
            max_types: DEFAULT_MAX_DESCRIBED_TYPES,
        }
    }
}

/// Media types assigned to operations that do not declare their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeDefaults {
    /// Used when an operation's payload has to be a graph node
    pub linked_data: Vec<String>,
    /// Used for everything else
    pub plain: Vec<String>,
}

impl MediaTypeDefaults {
    pub fn select(&self, requires_linked_data: bool) -> &[String] {
        if requires_linked_data {
            &self.linked_data
        } else {
            &self.plain
        }
    }
}

impl Default for MediaTypeDefaults {
    fn default() -> Self {
        Self {
            linked_data: DEFAULT_LINKED_DATA_MEDIA_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            plain: DEFAULT_PLAIN_MEDIA_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Address every resource route and vocabulary IRI is resolved against
    pub base_uri: Url,
    /// Requested documentation profiles (empty: use the first registered strategy)
    pub profiles: Vec<String>,
    pub limits: SynthesisLimits,
    pub media_types: MediaTypeDefaults,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_uri: Url::parse(DEFAULT_BASE_URI).expect("default base URI is valid"),
            profiles: vec![],
            limits: SynthesisLimits::default(),
            media_types: MediaTypeDefaults::default(),
        }
    }
}

impl SynthesisConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, EnvError> {
        let base_uri = {
            let value = env.get_or_else(HYDRO_BASE_URI, DEFAULT_BASE_URI);
            Url::parse(&value).map_err(|e| EnvError::InvalidValue {
                env_key: HYDRO_BASE_URI,
                env_value: value.clone(),
                message: e.to_string(),
            })?
        };

        let limits = SynthesisLimits {
            max_depth: get_number(env, HYDRO_MAX_TYPE_DEPTH, DEFAULT_MAX_TYPE_DEPTH)?,
            max_types: get_number(env, HYDRO_MAX_DESCRIBED_TYPES, DEFAULT_MAX_DESCRIBED_TYPES)?,
        };

        let media_types = MediaTypeDefaults {
            linked_data: env.get_list(
                HYDRO_LINKED_DATA_MEDIA_TYPES,
                &DEFAULT_LINKED_DATA_MEDIA_TYPES,
            ),
            plain: env.get_list(HYDRO_PLAIN_MEDIA_TYPES, &DEFAULT_PLAIN_MEDIA_TYPES),
        };

        Ok(Self {
            base_uri,
            profiles: env.get_list(HYDRO_PROFILES, &[]),
            limits,
            media_types,
        })
    }
}
