// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::Verb;

use crate::descriptor::OperationDescriptor;
use crate::matcher::RouteBindings;

/// Operation descriptors in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    operations: Vec<OperationDescriptor>,
}

#[derive(Debug, Clone)]
pub struct RouteMatch<'t> {
    pub operation: &'t OperationDescriptor,
    pub bindings: RouteBindings,
}

impl RouteTable {
    pub fn new(operations: Vec<OperationDescriptor>) -> Self {
        Self { operations }
    }

    /// The first operation, in declaration order, serving the request.
    pub fn find(&self, verb: Verb, path_and_query: &str) -> Option<RouteMatch<'_>> {
        let path_and_query = path_and_query
            .split_once('#')
            .map_or(path_and_query, |(before, _)| before);

        self.operations.iter().find_map(|operation| {
            operation
                .matches(verb, path_and_query)
                .map(|bindings| RouteMatch {
                    operation,
                    bindings,
                })
        })
    }

    pub fn get(&self, id: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
