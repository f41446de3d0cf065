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
pub enum RouteError {
    #[error("Variable `{variable}` of operation `{operation}` cannot be used in a route")]
    InvalidVariable { operation: String, variable: String },

    #[error("Route `{route}` of operation `{operation}` is malformed: {message}")]
    InvalidRoute {
        operation: String,
        route: String,
        message: String,
    },

    #[error("Could not compile route pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}
