// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The declared shape of an API: composite types, the resources exposing them and the operations
//! (methods with typed parameters and results) each resource offers.
//!
//! Everything in here is plain, serializable metadata. Declarative markers (explicit verbs,
//! routes and parameter sources) are resolved into these records once, when the model is built,
//! so that route synthesis and description building never have to look them up again.

pub mod error;
pub mod mapped_arena;
pub mod model;
pub mod operation;
pub mod primitive_type;
pub mod types;

pub use error::ModelError;
pub use model::{ApiModel, ResolvedApi, TypeGraph};
pub use operation::{
    OperationDefinition, ParameterDefinition, ParameterSource, ResourceDefinition,
    ResultDefinition, ResultTarget, Verb,
};
pub use primitive_type::PrimitiveType;
pub use types::{MemberDefinition, TypeDefinition, TypeRef};
