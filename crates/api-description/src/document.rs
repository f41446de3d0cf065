// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::Verb;
use type_description::{ClassDescription, ClassId, ClassKind};

/// An operation as documented: what it expects and what it returns.
#[derive(Debug, Clone)]
pub struct SupportedOperation {
    pub id: String,
    /// The method name
    pub label: String,
    pub description: Option<String>,
    pub method: Verb,
    pub expects: Vec<ClassId>,
    pub returns: Vec<ClassId>,
    /// Response headers (name and value class)
    pub returns_header: Vec<(String, ClassId)>,
    pub media_types: Vec<String>,
    pub requires_linked_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriTemplateMapping {
    pub variable: String,
    pub required: bool,
    /// IRI of the property the variable's value stands for
    pub property: String,
}

#[derive(Debug, Clone)]
pub struct IriTemplate {
    pub id: String,
    /// RFC 6570 template (`/people/{id}{?page,itemsPerPage}`)
    pub template: String,
    pub mappings: Vec<IriTemplateMapping>,
}

impl IriTemplate {
    pub fn mapping(&self, variable: &str) -> Option<&IriTemplateMapping> {
        self.mappings.iter().find(|m| m.variable == variable)
    }
}

/// Connects a template to the operations invoked through the IRIs it generates.
#[derive(Debug, Clone)]
pub struct TemplatedLink {
    pub id: String,
    pub template: String,
    /// Ids of the operations
    pub operations: Vec<String>,
}

/// A property made up for a template variable with no counterpart in the resource class.
#[derive(Debug, Clone)]
pub struct OperationProperty {
    pub id: String,
    pub label: String,
    pub range: ClassId,
}

/// Everything documented about one resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceDocumentation {
    pub operations: Vec<SupportedOperation>,
    pub templates: Vec<IriTemplate>,
    pub links: Vec<TemplatedLink>,
    pub properties: Vec<OperationProperty>,
}

impl ResourceDocumentation {
    pub fn operation(&self, id: &str) -> Option<&SupportedOperation> {
        self.operations.iter().find(|o| o.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&IriTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The link through which an operation is reached, if it has a template.
    pub fn link_for(&self, operation_id: &str) -> Option<&TemplatedLink> {
        self.links
            .iter()
            .find(|l| l.operations.iter().any(|o| o == operation_id))
    }

    pub(crate) fn extend(&mut self, other: ResourceDocumentation) {
        self.operations.extend(other.operations);
        self.templates.extend(other.templates);
        self.links.extend(other.links);
        self.properties.extend(other.properties);
    }
}

/// The root of the produced description.
#[derive(Debug, Clone)]
pub struct ApiDocumentation {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// IRI of the entry point resource
    pub entry_point: String,
    pub entry_point_class: ClassId,
    /// Every class built during synthesis, indexed by `ClassId`
    pub classes: Vec<ClassDescription>,
    pub supported_classes: Vec<ClassId>,
    pub resources: ResourceDocumentation,
}

impl ApiDocumentation {
    pub fn class(&self, id: ClassId) -> &ClassDescription {
        &self.classes[id.index()]
    }

    pub fn class_by_iri(&self, iri: &str) -> Option<&ClassDescription> {
        self.classes.iter().find(|c| c.id == iri)
    }

    /// Classes of the API's own types (no entry point, datatypes, lists or call-site
    /// subclasses).
    pub fn type_classes(&self) -> impl Iterator<Item = &ClassDescription> {
        self.supported_classes
            .iter()
            .filter(|id| **id != self.entry_point_class)
            .map(|id| self.class(*id))
            .filter(|c| c.kind == ClassKind::Class)
    }
}
