// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Routes for the operations of an API: verbs and routes inferred from method names, argument
//! binding, and matchers aligned with the documented URL templates.

mod binding;
mod cache;
mod descriptor;
mod error;
mod matcher;
mod naming;
mod synthesizer;
mod table;

pub use binding::{BindingPolicy, DefaultBindingPolicy};
pub use cache::RouteCache;
pub use descriptor::{ArgumentDescriptor, OperationDescriptor, ResultDescriptor};
pub use error::RouteError;
pub use matcher::{RouteBindings, RouteMatcher};
pub use naming::{InferredRoute, infer_route, join_path, resource_segment};
pub use synthesizer::{
    CONTENT_RANGE_HEADER, ITEMS_PER_PAGE_VARIABLE, PAGE_VARIABLE, RouteSynthesizer,
};
pub use table::{RouteMatch, RouteTable};
