// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ModelError;
use crate::mapped_arena::MappedArena;
use crate::operation::ResourceDefinition;
use crate::primitive_type::PrimitiveType;
use crate::types::{TypeDefinition, TypeRef};

/// An API as declared by a controller-metadata provider (or a model file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiModel {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overrides the configured base address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

impl ApiModel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            base_uri: None,
            types: vec![],
            resources: vec![],
        }
    }

    pub fn from_json(value: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_type(mut self, typ: TypeDefinition) -> Self {
        self.types.push(typ);
        self
    }

    pub fn with_resource(mut self, resource: ResourceDefinition) -> Self {
        self.resources.push(resource);
        self
    }

    /// Check every reference and index the types by name.
    pub fn resolve(self) -> Result<ResolvedApi, ModelError> {
        let base_uri = self
            .base_uri
            .map(|uri| {
                Url::parse(&uri).map_err(|e| ModelError::InvalidBaseUri {
                    uri: uri.clone(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        let types = TypeGraph::new(self.types)?;

        for resource in &self.resources {
            if types.get(&resource.type_name).is_none() {
                return Err(ModelError::UnresolvedType {
                    type_name: resource.type_name.clone(),
                    context: format!("resource `{}`", resource.type_name),
                });
            }

            let mut seen = HashSet::new();
            for operation in &resource.operations {
                if !seen.insert(operation.name.as_str()) {
                    return Err(ModelError::DuplicateOperation {
                        resource: resource.type_name.clone(),
                        operation: operation.name.clone(),
                    });
                }

                let context = || format!("operation `{}.{}`", resource.type_name, operation.name);
                for parameter in &operation.parameters {
                    types.check_resolves(&parameter.typ, context)?;
                }
                for result in &operation.results {
                    types.check_resolves(&result.typ, context)?;
                }
            }
        }

        Ok(ResolvedApi {
            title: self.title,
            description: self.description,
            base_uri,
            types,
            resources: self.resources,
        })
    }
}

/// A validated [`ApiModel`]: every named type reference resolves.
#[derive(Debug, Clone)]
pub struct ResolvedApi {
    pub title: String,
    pub description: Option<String>,
    pub base_uri: Option<Url>,
    pub types: TypeGraph,
    pub resources: Vec<ResourceDefinition>,
}

impl ResolvedApi {
    pub fn resource(&self, type_name: &str) -> Option<&ResourceDefinition> {
        self.resources.iter().find(|r| r.type_name == type_name)
    }
}

/// Composite types by name.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: MappedArena<TypeDefinition>,
}

impl TypeGraph {
    pub fn new(definitions: Vec<TypeDefinition>) -> Result<Self, ModelError> {
        let mut types = MappedArena::default();

        for definition in definitions {
            if PrimitiveType::from_name(&definition.name).is_some() {
                return Err(ModelError::ReservedTypeName(definition.name));
            }
            let name = definition.name.clone();
            if types.insert(&name, definition).is_err() {
                return Err(ModelError::DuplicateType(name));
            }
        }

        let graph = Self { types };

        for (name, definition) in graph.types.iter() {
            for member in &definition.members {
                graph.check_resolves(&member.typ, || format!("member `{name}.{}`", member.name))?;
            }
        }

        Ok(graph)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get_by_key(name)
    }

    /// The composite type a reference points at, looking through lists and optionals.
    pub fn resolve(&self, typ: &TypeRef) -> Option<&TypeDefinition> {
        typ.innermost_named().and_then(|name| self.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter().map(|(_, definition)| definition)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check_resolves(
        &self,
        typ: &TypeRef,
        context: impl FnOnce() -> String,
    ) -> Result<(), ModelError> {
        match typ.innermost_named() {
            Some(name) if !self.types.contains_key(name) => Err(ModelError::UnresolvedType {
                type_name: name.to_string(),
                context: context(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{OperationDefinition, ParameterDefinition};
    use crate::types::MemberDefinition;
    use multiplatform_test::multiplatform_test;

    const PEOPLE_MODEL: &str = r#"{
        "title": "People",
        "base_uri": "http://example.com/api/",
        "types": [
            {
                "name": "Person",
                "members": [
                    {"name": "id", "type": "Int", "key": true, "writeable": false},
                    {"name": "name", "type": "String"},
                    {"name": "friends", "type": "[Person]"}
                ]
            }
        ],
        "resources": [
            {
                "type": "Person",
                "operations": [
                    {"name": "list", "results": [{"type": "[Person]"}]},
                    {"name": "get", "parameters": [{"name": "id", "type": "Int"}], "results": [{"type": "Person"}]}
                ]
            }
        ]
    }"#;

    #[multiplatform_test]
    fn resolve_model_file() {
        let api = ApiModel::from_json(PEOPLE_MODEL).unwrap().resolve().unwrap();

        assert_eq!(api.base_uri.unwrap().as_str(), "http://example.com/api/");
        assert_eq!(api.types.len(), 1);
        let person = api.types.get("Person").unwrap();
        assert_eq!(person.key_members().count(), 1);
        assert_eq!(
            api.types.resolve(&"[Person]?".parse().unwrap()).map(|t| t.name.as_str()),
            Some("Person")
        );
        assert_eq!(api.resources[0].operations.len(), 2);
    }

    #[multiplatform_test]
    fn unresolved_member_type() {
        let result = TypeGraph::new(vec![
            TypeDefinition::new("Person")
                .with_member(MemberDefinition::new("address", TypeRef::named("Address"))),
        ]);

        assert!(matches!(
            result,
            Err(ModelError::UnresolvedType { type_name, .. }) if type_name == "Address"
        ));
    }

    #[multiplatform_test]
    fn unresolved_parameter_type() {
        let result = ApiModel::new("People")
            .with_type(TypeDefinition::new("Person"))
            .with_resource(
                ResourceDefinition::new("Person").with_operation(
                    OperationDefinition::new("create")
                        .with_param(ParameterDefinition::new("input", TypeRef::named("Draft"))),
                ),
            )
            .resolve();

        assert!(matches!(result, Err(ModelError::UnresolvedType { .. })));
    }

    #[multiplatform_test]
    fn duplicate_and_reserved_names() {
        assert!(matches!(
            TypeGraph::new(vec![TypeDefinition::new("A"), TypeDefinition::new("A")]),
            Err(ModelError::DuplicateType(_))
        ));
        assert!(matches!(
            TypeGraph::new(vec![TypeDefinition::new("String")]),
            Err(ModelError::ReservedTypeName(_))
        ));

        let duplicate_operation = ApiModel::new("People")
            .with_type(TypeDefinition::new("Person"))
            .with_resource(
                ResourceDefinition::new("Person")
                    .with_operation(OperationDefinition::new("list"))
                    .with_operation(OperationDefinition::new("list")),
            )
            .resolve();
        assert!(matches!(
            duplicate_operation,
            Err(ModelError::DuplicateOperation { .. })
        ));
    }
}
