// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod document;
mod entry_point;
mod error;
mod json_ld;
mod media;
mod orchestrator;
mod pagination;

pub use document::{
    ApiDocumentation, IriTemplate, IriTemplateMapping, OperationProperty, ResourceDocumentation,
    SupportedOperation, TemplatedLink,
};
pub use entry_point::{ENTRY_POINT_CLASS, EntryPointAggregator};
pub use error::ApiDescriptionError;
pub use json_ld::to_json_ld;
pub use media::{DeclaredMediaTypes, MediaTypeProvider};
pub use orchestrator::{ApiDescriptionOrchestrator, ResourceDescription};
pub use pagination::ContentRange;
