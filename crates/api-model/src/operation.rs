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

use crate::types::TypeRef;

/// The HTTP method for the operation
///
/// We can't use http::Method, since it is not serializable.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "PATCH" => Some(Verb::Patch),
            "DELETE" => Some(Verb::Delete),
            "HEAD" => Some(Verb::Head),
            "OPTIONS" => Some(Verb::Options),
            _ => None,
        }
    }

    /// Does the verb leave server state untouched?
    pub fn is_safe(&self) -> bool {
        matches!(self, Verb::Get | Verb::Head | Verb::Options)
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => http::Method::GET,
            Verb::Post => http::Method::POST,
            Verb::Put => http::Method::PUT,
            Verb::Patch => http::Method::PATCH,
            Verb::Delete => http::Method::DELETE,
            Verb::Head => http::Method::HEAD,
            Verb::Options => http::Method::OPTIONS,
        }
    }
}

impl TryFrom<&http::Method> for Verb {
    type Error = String;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        Verb::parse(method.as_str()).ok_or_else(|| method.to_string())
    }
}

/// Where the value of a parameter comes from in a request
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Body,
    Query,
    /// A URL path segment
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: TypeRef,
    /// Explicit binding marker; when absent the binding policy decides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ParameterSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, typ: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            source: None,
            description: None,
        }
    }

    pub fn from_source(mut self, source: ParameterSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.typ.is_optional()
    }
}

/// Where a result is written in the response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResultTarget {
    #[default]
    Body,
    /// A response header, by name
    Header(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDefinition {
    #[serde(rename = "type")]
    pub typ: TypeRef,
    #[serde(default)]
    pub target: ResultTarget,
}

impl ResultDefinition {
    pub fn body(typ: impl Into<TypeRef>) -> Self {
        Self {
            typ: typ.into(),
            target: ResultTarget::Body,
        }
    }

    pub fn header(name: impl Into<String>, typ: impl Into<TypeRef>) -> Self {
        Self {
            typ: typ.into(),
            target: ResultTarget::Header(name.into()),
        }
    }
}

/// A service method exposed by a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDefinition {
    /// The method name (e.g. `listActive`), used to infer the verb and route when they are not
    /// declared
    pub name: String,
    /// Explicit verb markers. More than one verb produces one operation per verb.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verbs: Vec<Verb>,
    /// Explicit route relative to the resource's route prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
    /// Media types the operation declares for itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overrides paging detection for collection results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paged: Option<bool>,
}

impl OperationDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbs: vec![],
            route: None,
            parameters: vec![],
            results: vec![],
            media_types: vec![],
            description: None,
            paged: None,
        }
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verbs.push(verb);
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_param(mut self, param: ParameterDefinition) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn returning(mut self, typ: impl Into<TypeRef>) -> Self {
        self.results.push(ResultDefinition::body(typ));
        self
    }

    pub fn with_result(mut self, result: ResultDefinition) -> Self {
        self.results.push(result);
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_types.push(media_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_paging(mut self, paged: bool) -> Self {
        self.paged = Some(paged);
        self
    }

    /// The type written to the response body, if any
    pub fn body_result(&self) -> Option<&TypeRef> {
        self.results
            .iter()
            .find(|r| r.target == ResultTarget::Body)
            .map(|r| &r.typ)
    }
}

/// A set of operations around one composite type, sharing a route prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// The composite type this resource exposes
    #[serde(rename = "type")]
    pub type_name: String,
    /// Explicit route prefix (e.g. `/people`); inferred from the type name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationDefinition>,
}

impl ResourceDefinition {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            route: None,
            operations: vec![],
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_operation(mut self, operation: OperationDefinition) -> Self {
        self.operations.push(operation);
        self
    }
}
