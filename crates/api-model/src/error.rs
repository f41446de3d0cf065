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
pub enum ModelError {
    #[error("Type `{0}` is defined more than once")]
    DuplicateType(String),

    #[error("Type name `{0}` is reserved for a primitive type")]
    ReservedTypeName(String),

    #[error("Reference to undefined type `{type_name}` in {context}")]
    UnresolvedType { type_name: String, context: String },

    #[error("Resource `{resource}` declares operation `{operation}` more than once")]
    DuplicateOperation { resource: String, operation: String },

    #[error("Invalid type expression `{0}`")]
    InvalidTypeExpression(String),

    #[error("Invalid base URI `{uri}`: {message}")]
    InvalidBaseUri { uri: String, message: String },

    #[error("Unable to parse model: {0}")]
    Parse(#[from] serde_json::Error),
}
