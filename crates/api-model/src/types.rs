// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::primitive_type::PrimitiveType;

/// A reference to a type from a member, parameter or result.
///
/// In model files a reference is written as a type expression: `Int`, `Person`, `[Person]`,
/// `String?` or `[Person]?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    /// A composite type, by name
    Named(String),
    List(Box<TypeRef>),
    Optional(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(item: TypeRef) -> Self {
        TypeRef::List(Box::new(item))
    }

    /// Wrap this reference to make it optional (if not already)
    pub fn optional(self) -> Self {
        match self {
            TypeRef::Optional(_) => self,
            _ => TypeRef::Optional(Box::new(self)),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }

    /// The reference with any optional wrapper removed.
    pub fn required(&self) -> &TypeRef {
        match self {
            TypeRef::Optional(inner) => inner.required(),
            _ => self,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.required(), TypeRef::List(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self.required() {
            TypeRef::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    /// Name of the innermost composite type, looking through lists and optionals.
    pub fn innermost_named(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive(_) => None,
            TypeRef::Named(name) => Some(name),
            TypeRef::List(inner) | TypeRef::Optional(inner) => inner.innermost_named(),
        }
    }

    /// Identity of the described type: optionality does not produce a distinct class.
    pub fn description_key(&self) -> String {
        self.required().to_string()
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(primitive: PrimitiveType) -> Self {
        TypeRef::Primitive(primitive)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Primitive(primitive) => write!(f, "{primitive}"),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ModelError::InvalidTypeExpression(s.to_string());

        if let Some(inner) = s.strip_suffix('?') {
            let inner: TypeRef = inner.parse().map_err(|_| invalid())?;
            return if inner.is_optional() {
                Err(invalid())
            } else {
                Ok(inner.optional())
            };
        }

        if let Some(inner) = s.strip_prefix('[') {
            let inner = inner.strip_suffix(']').ok_or_else(invalid)?;
            return Ok(TypeRef::list(inner.parse().map_err(|_| invalid())?));
        }

        let is_identifier = s
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !is_identifier {
            return Err(invalid());
        }

        Ok(match PrimitiveType::from_name(s) {
            Some(primitive) => TypeRef::Primitive(primitive),
            None => TypeRef::Named(s.to_string()),
        })
    }
}

impl TryFrom<String> for TypeRef {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// A composite type exposed through an API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberDefinition>,
    /// Instances are graph nodes with their own IRI
    #[serde(default)]
    pub addressable: bool,
    /// Supplied by the hosting environment at invocation time (the authenticated principal, for
    /// example) rather than by the caller
    #[serde(default)]
    pub context: bool,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: vec![],
            addressable: false,
            context: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_member(mut self, member: MemberDefinition) -> Self {
        self.members.push(member);
        self
    }

    pub fn addressable(mut self) -> Self {
        self.addressable = true;
        self
    }

    pub fn context(mut self) -> Self {
        self.context = true;
        self
    }

    /// Is an instance of this type a graph node (as opposed to a plain document)?
    pub fn is_graph_addressable(&self) -> bool {
        self.addressable
            || self
                .members
                .iter()
                .any(|m| m.key && m.typ.as_primitive() == Some(PrimitiveType::Iri))
    }

    pub fn key_members(&self) -> impl Iterator<Item = &MemberDefinition> {
        self.members.iter().filter(|m| m.key)
    }

    pub fn member(&self, name: &str) -> Option<&MemberDefinition> {
        self.members.iter().find(|m| m.name == name)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifies the owning instance
    #[serde(default)]
    pub key: bool,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default = "default_true")]
    pub writeable: bool,
}

impl MemberDefinition {
    pub fn new(name: impl Into<String>, typ: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            description: None,
            key: false,
            readable: true,
            writeable: true,
        }
    }

    /// A key member; keys are assigned by the server and so are not writeable.
    pub fn key(name: impl Into<String>, typ: impl Into<TypeRef>) -> Self {
        Self {
            key: true,
            writeable: false,
            ..Self::new(name, typ)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.writeable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn is_exposed(&self) -> bool {
        self.readable || self.writeable
    }
}
