// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Scalar types understood without a type definition. Each is documented as an RDF datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Int,
    Long,
    Float,
    Decimal,
    String,
    Uuid,
    Date,
    DateTime,
    Time,
    Duration,
    /// An absolute IRI. A key member of this type makes its owner a graph node.
    Iri,
    Blob,
    Json,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 14] = [
        PrimitiveType::Boolean,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Decimal,
        PrimitiveType::String,
        PrimitiveType::Uuid,
        PrimitiveType::Date,
        PrimitiveType::DateTime,
        PrimitiveType::Time,
        PrimitiveType::Duration,
        PrimitiveType::Iri,
        PrimitiveType::Blob,
        PrimitiveType::Json,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Int => "Int",
            PrimitiveType::Long => "Long",
            PrimitiveType::Float => "Float",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::String => "String",
            PrimitiveType::Uuid => "Uuid",
            PrimitiveType::Date => "Date",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::Time => "Time",
            PrimitiveType::Duration => "Duration",
            PrimitiveType::Iri => "Iri",
            PrimitiveType::Blob => "Blob",
            PrimitiveType::Json => "Json",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Compact IRI of the datatype used to document values of this type.
    pub fn datatype_iri(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "xsd:boolean",
            PrimitiveType::Int => "xsd:int",
            PrimitiveType::Long => "xsd:long",
            PrimitiveType::Float => "xsd:double",
            PrimitiveType::Decimal => "xsd:decimal",
            PrimitiveType::String | PrimitiveType::Uuid => "xsd:string",
            PrimitiveType::Date => "xsd:date",
            PrimitiveType::DateTime => "xsd:dateTime",
            PrimitiveType::Time => "xsd:time",
            PrimitiveType::Duration => "xsd:duration",
            PrimitiveType::Iri => "xsd:anyURI",
            PrimitiveType::Blob => "xsd:base64Binary",
            PrimitiveType::Json => "rdf:JSON",
        }
    }

    /// Can a value of this type identify a resource in a URL path?
    pub fn is_identifier_like(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Int
                | PrimitiveType::Long
                | PrimitiveType::String
                | PrimitiveType::Uuid
                | PrimitiveType::Iri
        )
    }

    /// Capture pattern for a value of this type in a URL path segment.
    pub fn path_pattern(&self) -> &'static str {
        match self {
            PrimitiveType::Int | PrimitiveType::Long => "[+-]?[0-9]+",
            _ => "[^/?#]+",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
