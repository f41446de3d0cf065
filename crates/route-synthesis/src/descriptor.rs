// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_model::{ParameterDefinition, ParameterSource, ResultTarget, TypeRef, Verb};

use crate::matcher::{RouteBindings, RouteMatcher};

#[derive(Debug, Clone)]
pub struct ArgumentDescriptor {
    pub parameter: ParameterDefinition,
    /// Where the argument comes from (`None` when the request does not carry it)
    pub source: Option<ParameterSource>,
    /// Template variable (`None` for body and unbound arguments)
    pub variable: Option<String>,
    /// Identifies an instance of the owning resource
    pub identity: bool,
    /// Added by paging rather than declared
    pub implicit: bool,
}

impl ArgumentDescriptor {
    pub fn in_template(&self) -> bool {
        self.variable.is_some()
    }

    /// Must a request carry this argument?
    pub fn is_required(&self) -> bool {
        self.identity
            || self.source == Some(ParameterSource::Path)
            || (self.in_template() && !self.parameter.is_optional())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultDescriptor {
    pub typ: TypeRef,
    pub target: ResultTarget,
    pub implicit: bool,
}

/// One routable operation: a method exposed through one verb.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    /// Stable identity (`Person.list`, or `Person.update.put` for one verb of many)
    pub id: String,
    /// Type name of the owning resource
    pub resource: String,
    pub method_name: String,
    pub verb: Verb,
    /// Display template (`/people/{id}{?page,itemsPerPage}`)
    pub template: String,
    pub matcher: RouteMatcher,
    /// Shared between the descriptors of a method with several verbs
    pub arguments: Arc<Vec<ArgumentDescriptor>>,
    pub results: Arc<Vec<ResultDescriptor>>,
    pub media_types: Vec<String>,
    pub paged: bool,
}

impl OperationDescriptor {
    pub fn template_arguments(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.arguments.iter().filter(|a| a.in_template())
    }

    pub fn has_template_variables(&self) -> bool {
        self.template_arguments().next().is_some()
    }

    pub fn body_arguments(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.arguments
            .iter()
            .filter(|a| a.source == Some(ParameterSource::Body))
    }

    pub fn body_result(&self) -> Option<&ResultDescriptor> {
        self.results.iter().find(|r| r.target == ResultTarget::Body)
    }

    pub fn header_results(&self) -> impl Iterator<Item = (&str, &ResultDescriptor)> {
        self.results.iter().filter_map(|r| match &r.target {
            ResultTarget::Header(name) => Some((name.as_str(), r)),
            ResultTarget::Body => None,
        })
    }

    /// A read of the whole collection (the resource's entry point).
    pub fn is_collection_read(&self) -> bool {
        self.verb == Verb::Get
            && !self
                .arguments
                .iter()
                .any(|a| a.source == Some(ParameterSource::Path))
            && self.body_result().is_some_and(|r| r.typ.is_list())
    }

    pub fn matches(&self, verb: Verb, path_and_query: &str) -> Option<RouteBindings> {
        if verb != self.verb {
            return None;
        }
        self.matcher.bindings(path_and_query)
    }
}
