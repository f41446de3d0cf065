// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Linked-data class descriptions for the types of an API.
//!
//! This crate provides:
//! - The class graph model (`ClassDescription`, `SupportedProperty`, `Restriction`)
//! - `DescriptionContext`, the per-synthesis memo table that makes describing a type idempotent
//!   and lets self-referential types terminate
//! - The Hydra builder strategy and the registry that picks a strategy by documentation profile

pub mod builder;
pub mod class;
pub mod context;
pub mod documentation;
pub mod error;
pub mod strategy;
pub mod vocabulary;

pub use builder::HydraTypeDescriptionBuilder;
pub use class::{
    ClassDescription, ClassId, ClassKind, Restriction, RestrictionConstraint, SupportedProperty,
};
pub use context::{DescriptionContext, TypeScope};
pub use documentation::{DocumentationProvider, ModelDocumentation};
pub use error::DescriptionError;
pub use strategy::{StrategyRegistry, TypeDescriptionStrategy};
pub use vocabulary::Vocabulary;
