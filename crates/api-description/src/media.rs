// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::{OperationDefinition, ResourceDefinition};

/// Media types an operation declares for itself, overriding the configured defaults.
pub trait MediaTypeProvider: Send + Sync {
    fn media_types(
        &self,
        _resource: &ResourceDefinition,
        operation: &OperationDefinition,
    ) -> Option<Vec<String>> {
        (!operation.media_types.is_empty()).then(|| operation.media_types.clone())
    }
}

/// Reads the media types declared in the model.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredMediaTypes;

impl MediaTypeProvider for DeclaredMediaTypes {}
