// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::{ParameterDefinition, ParameterSource, PrimitiveType, TypeGraph, TypeRef};

/// Decides where the argument for a parameter without an explicit marker comes from.
pub trait BindingPolicy: Send + Sync {
    /// `None` when the argument is not taken from the request (for example, an authenticated
    /// principal bound at invocation time).
    fn source(&self, parameter: &ParameterDefinition, types: &TypeGraph)
    -> Option<ParameterSource>;

    /// Does the parameter identify an instance of the resource?
    fn is_identity(&self, parameter: &ParameterDefinition) -> bool;
}

/// - identifier-shaped scalars go to the path
/// - other scalars go to the query string
/// - composite values go to the body
/// - context types are not bound from the request
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBindingPolicy;

impl BindingPolicy for DefaultBindingPolicy {
    fn source(
        &self,
        parameter: &ParameterDefinition,
        types: &TypeGraph,
    ) -> Option<ParameterSource> {
        match parameter.typ.required() {
            TypeRef::Primitive(PrimitiveType::Blob | PrimitiveType::Json) => {
                Some(ParameterSource::Body)
            }
            TypeRef::Primitive(_) if self.is_identity(parameter) => Some(ParameterSource::Path),
            TypeRef::Primitive(_) => Some(ParameterSource::Query),
            typ => match types.resolve(typ) {
                Some(definition) if definition.context => None,
                Some(_) => Some(ParameterSource::Body),
                // Lists of scalars
                None if typ.innermost_named().is_none() => Some(ParameterSource::Body),
                None => None,
            },
        }
    }

    fn is_identity(&self, parameter: &ParameterDefinition) -> bool {
        let name = parameter.name.as_str();
        let identifier_name = name.eq_ignore_ascii_case("id")
            || name.ends_with("Id")
            || name.to_ascii_lowercase().ends_with("_id");

        identifier_name
            && !parameter.typ.is_optional()
            && parameter
                .typ
                .as_primitive()
                .is_some_and(|primitive| primitive.is_identifier_like())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_model::{MemberDefinition, TypeDefinition};
    use multiplatform_test::multiplatform_test;

    fn types() -> TypeGraph {
        TypeGraph::new(vec![
            TypeDefinition::new("Person").with_member(MemberDefinition::key("id", PrimitiveType::Int)),
            TypeDefinition::new("Principal").context(),
        ])
        .unwrap()
    }

    fn source(name: &str, typ: &str) -> Option<ParameterSource> {
        let parameter = ParameterDefinition::new(name, typ.parse::<TypeRef>().unwrap());
        DefaultBindingPolicy.source(&parameter, &types())
    }

    #[multiplatform_test]
    fn default_sources() {
        assert_eq!(source("id", "Int"), Some(ParameterSource::Path));
        assert_eq!(source("personId", "Uuid"), Some(ParameterSource::Path));
        assert_eq!(source("order_id", "String"), Some(ParameterSource::Path));
        assert_eq!(source("page", "Int?"), Some(ParameterSource::Query));
        assert_eq!(source("active", "Boolean"), Some(ParameterSource::Query));
        // Not identifier-like, so not a path segment
        assert_eq!(source("id", "DateTime"), Some(ParameterSource::Query));
        // Optional identifiers cannot be path segments
        assert_eq!(source("id", "Int?"), Some(ParameterSource::Query));
        assert_eq!(source("person", "Person"), Some(ParameterSource::Body));
        assert_eq!(source("people", "[Person]"), Some(ParameterSource::Body));
        assert_eq!(source("tags", "[String]"), Some(ParameterSource::Body));
        assert_eq!(source("attachment", "Blob"), Some(ParameterSource::Body));
        assert_eq!(source("principal", "Principal"), None);
    }

    #[multiplatform_test]
    fn identity_names() {
        let identity = |name: &str| {
            DefaultBindingPolicy.is_identity(&ParameterDefinition::new(name, PrimitiveType::Int))
        };

        assert!(identity("id"));
        assert!(identity("ID"));
        assert!(identity("ownerId"));
        assert!(identity("owner_id"));
        assert!(!identity("identity"));
        assert!(!identity("paid"));
    }
}
