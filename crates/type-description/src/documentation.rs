// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::{
    MemberDefinition, OperationDefinition, ParameterDefinition, ResourceDefinition,
    TypeDefinition,
};

/// Read-only source of human-facing documentation text.
///
/// Missing text is not an error: every lookup may return `None`. The default methods read the
/// descriptions carried by the model itself.
pub trait DocumentationProvider: Send + Sync {
    fn type_description(&self, typ: &TypeDefinition) -> Option<String> {
        typ.description.clone()
    }

    fn member_description(
        &self,
        _typ: &TypeDefinition,
        member: &MemberDefinition,
    ) -> Option<String> {
        member.description.clone()
    }

    fn operation_description(
        &self,
        _resource: &ResourceDefinition,
        operation: &OperationDefinition,
    ) -> Option<String> {
        operation.description.clone()
    }

    fn parameter_description(
        &self,
        _operation: &OperationDefinition,
        parameter: &ParameterDefinition,
    ) -> Option<String> {
        parameter.description.clone()
    }
}

/// Documentation taken verbatim from the model.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelDocumentation;

impl DocumentationProvider for ModelDocumentation {}
