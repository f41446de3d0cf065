// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The class graph produced by description builders.
//!
//! Classes refer to each other through [`ClassId`]s into the owning
//! [`DescriptionContext`](crate::DescriptionContext), which is what lets a class reference itself.

use std::fmt::{Display, Formatter};

use crate::vocabulary::RDF_LIST;

/// Position of a class in its description context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

impl ClassId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// A scalar datatype (`xsd:int` and friends)
    Datatype,
    /// A composite type of the API
    Class,
    /// A collection, described as a recursive `rdf:List`
    List,
    /// A blank node specializing another class for one call site
    Subclass,
}

#[derive(Debug, Clone)]
pub struct ClassDescription {
    /// IRI, compact IRI or blank node label (`_:b0`)
    pub id: String,
    pub kind: ClassKind,
    pub label: Option<String>,
    pub description: Option<String>,
    pub supported_properties: Vec<SupportedProperty>,
    pub restrictions: Vec<Restriction>,
    pub sub_class_of: Vec<ClassId>,
    /// Does a value of this class stand for a single instance (as opposed to a collection)?
    pub single_value: bool,
    pub media_types: Vec<String>,
    /// IRIs of operations attached directly to this class
    pub supported_operations: Vec<String>,
    /// IRIs of templated links through which operations are reached
    pub links: Vec<String>,
}

impl ClassDescription {
    fn empty(id: String, kind: ClassKind) -> Self {
        Self {
            id,
            kind,
            label: None,
            description: None,
            supported_properties: vec![],
            restrictions: vec![],
            sub_class_of: vec![],
            single_value: true,
            media_types: vec![],
            supported_operations: vec![],
            links: vec![],
        }
    }

    pub fn datatype(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::empty(id.into(), ClassKind::Datatype)
        }
    }

    pub fn class(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::empty(id.into(), ClassKind::Class)
        }
    }

    pub fn list(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            single_value: false,
            ..Self::empty(id.into(), ClassKind::List)
        }
    }

    pub fn subclass(id: impl Into<String>, base: ClassId, single_value: bool) -> Self {
        Self {
            sub_class_of: vec![base],
            single_value,
            ..Self::empty(id.into(), ClassKind::Subclass)
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// The `rdf:type` of this node.
    pub fn rdf_type(&self) -> &'static str {
        match self.kind {
            ClassKind::Datatype => "rdfs:Datatype",
            ClassKind::Class | ClassKind::List | ClassKind::Subclass => "hydra:Class",
        }
    }

    /// Classes implicitly derived from `rdf:List` do not name it in `sub_class_of`.
    pub fn implicit_super_class(&self) -> Option<&'static str> {
        matches!(self.kind, ClassKind::List).then_some(RDF_LIST)
    }

    pub fn is_blank(&self) -> bool {
        self.id.starts_with("_:")
    }

    pub fn property(&self, label: &str) -> Option<&SupportedProperty> {
        self.supported_properties.iter().find(|p| p.label == label)
    }

    pub fn property_ignore_case(&self, label: &str) -> Option<&SupportedProperty> {
        self.supported_properties
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone)]
pub struct SupportedProperty {
    /// IRI of the property
    pub id: String,
    /// The member name
    pub label: String,
    pub description: Option<String>,
    pub readable: bool,
    pub writeable: bool,
    pub required: bool,
    /// Does the property identify its owner?
    pub key: bool,
    /// Class of the property's values
    pub range: ClassId,
}

/// An `owl:Restriction` superclass constraining one property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub on_property: String,
    pub constraint: RestrictionConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionConstraint {
    AllValuesFrom(ClassId),
    MaxCardinality(u32),
}

impl Restriction {
    pub fn all_values_from(on_property: impl Into<String>, class: ClassId) -> Self {
        Self {
            on_property: on_property.into(),
            constraint: RestrictionConstraint::AllValuesFrom(class),
        }
    }

    pub fn single_value(on_property: impl Into<String>) -> Self {
        Self {
            on_property: on_property.into(),
            constraint: RestrictionConstraint::MaxCardinality(1),
        }
    }
}
