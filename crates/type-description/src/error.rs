// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("Type `{0}` is not defined")]
    UnknownType(String),

    #[error("Type `{type_name}` is nested deeper than the limit of {limit}")]
    DepthLimitExceeded { type_name: String, limit: usize },

    #[error("More than {limit} distinct types were reached while describing the API")]
    TypeLimitExceeded { limit: usize },

    #[error("No description strategy supports any of the requested profiles: {}", requested.join(", "))]
    NoMatchingStrategy { requested: Vec<String> },

    #[error("No description strategy is registered")]
    NoStrategies,
}
