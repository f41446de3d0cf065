// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Well-known vocabularies and the IRIs minted for an API's own terms.

use api_model::TypeRef;
use url::Url;

pub const HYDRA: &str = "http://www.w3.org/ns/hydra/core#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Prefixes used for compact IRIs, in the order they appear in a JSON-LD context.
pub const PREFIXES: [(&str, &str); 5] = [
    ("hydra", HYDRA),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("owl", OWL),
    ("xsd", XSD),
];

/// The documentation profile served by the built-in Hydra strategy.
pub const HYDRA_PROFILE: &str = "http://www.w3.org/ns/hydra/core";

pub const RDF_LIST: &str = "rdf:List";
pub const RDF_FIRST: &str = "rdf:first";
pub const RDF_REST: &str = "rdf:rest";

pub const HYDRA_PAGE_INDEX: &str = "hydra:pageIndex";
pub const HYDRA_LIMIT: &str = "hydra:limit";

/// Mints IRIs for the classes, properties and operations of one API.
///
/// Every term lives under `<base>vocab#`, so `Person` becomes `http://localhost:8080/vocab#Person`
/// and its `name` member `http://localhost:8080/vocab#Person.name`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    namespace: String,
}

impl Vocabulary {
    pub fn new(base_uri: &Url) -> Self {
        let vocab = base_uri.join("vocab").unwrap_or_else(|_| base_uri.clone());
        Self {
            namespace: format!("{vocab}#"),
        }
    }

    /// The vocabulary document itself (also the id of the API documentation node).
    pub fn document_iri(&self) -> &str {
        self.namespace.trim_end_matches('#')
    }

    pub fn term(&self, name: &str) -> String {
        format!("{}{name}", self.namespace)
    }

    pub fn class_iri(&self, type_name: &str) -> String {
        self.term(type_name)
    }

    pub fn property_iri(&self, type_name: &str, member_name: &str) -> String {
        self.term(&format!("{type_name}.{member_name}"))
    }

    /// IRI of the list class describing a collection of `item`.
    ///
    /// Model type names cannot contain `-`, so these never collide with a declared type.
    pub fn list_class_iri(&self, item: &TypeRef) -> String {
        self.term(&list_fragment(item))
    }
}

fn list_fragment(item: &TypeRef) -> String {
    let item_name = match item.required() {
        TypeRef::Primitive(primitive) => primitive.name().to_string(),
        TypeRef::Named(name) => name.clone(),
        TypeRef::List(inner) => list_fragment(inner),
        TypeRef::Optional(inner) => list_fragment(inner),
    };
    format!("{item_name}-list")
}

/// Expand a compact IRI (`hydra:Class`) using the well-known prefixes.
pub fn expand(compact: &str) -> String {
    match compact.split_once(':') {
        Some((prefix, local)) if !local.starts_with("//") => PREFIXES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, namespace)| format!("{namespace}{local}"))
            .unwrap_or_else(|| compact.to_string()),
        _ => compact.to_string(),
    }
}
