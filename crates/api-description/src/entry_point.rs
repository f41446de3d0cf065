// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::ResolvedApi;
use tracing::instrument;
use type_description::{ClassDescription, ClassKind};

use crate::document::{ApiDocumentation, ResourceDocumentation};
use crate::error::ApiDescriptionError;
use crate::orchestrator::{ApiDescriptionOrchestrator, operation_iri};

pub const ENTRY_POINT_CLASS: &str = "EntryPoint";

/// Describes every resource of an API in one synthesis, and ties them together under an entry
/// point.
pub struct EntryPointAggregator<'o> {
    orchestrator: &'o ApiDescriptionOrchestrator,
}

impl<'o> EntryPointAggregator<'o> {
    pub fn new(orchestrator: &'o ApiDescriptionOrchestrator) -> Self {
        Self { orchestrator }
    }

    #[instrument(skip_all, fields(api = %api.title))]
    pub fn describe(
        &self,
        api: &ResolvedApi,
        profiles: &[String],
    ) -> Result<ApiDocumentation, ApiDescriptionError> {
        let strategy = self.orchestrator.strategy(profiles)?;
        let synthesizer = self.orchestrator.synthesizer(api);
        let mut context = self.orchestrator.context(api);

        let mut resources = ResourceDocumentation::default();
        let mut entry_links = vec![];
        let mut entry_operations = vec![];

        for resource in &api.resources {
            let (_, documentation) = self.orchestrator.describe_resource_in(
                &mut context,
                strategy,
                &synthesizer,
                api,
                resource,
            )?;

            let collection_read = synthesizer
                .synthesize_resource(api, resource)?
                .iter()
                .find(|d| d.is_collection_read())
                .map(|d| operation_iri(context.vocabulary(), d));

            if let Some(operation_id) = collection_read {
                match documentation.link_for(&operation_id) {
                    Some(link) => entry_links.push(link.id.clone()),
                    None => entry_operations.push(operation_id),
                }
            }

            resources.extend(documentation);
        }

        let entry_point_class = {
            let vocabulary = context.vocabulary();
            let mut class = ClassDescription::class(
                vocabulary.class_iri(ENTRY_POINT_CLASS),
                ENTRY_POINT_CLASS,
            )
            .with_description(Some(format!("The main entry point of {}", api.title)));
            class.links = entry_links;
            class.supported_operations = entry_operations;
            context.add_class(class)
        };

        let id = context.vocabulary().document_iri().to_string();
        let entry_point = self.orchestrator.base_uri(api).to_string();

        let supported_classes = context
            .classes()
            .filter(|(_, class)| class.kind == ClassKind::Class && !class.is_blank())
            .map(|(id, _)| id)
            .collect();
        let classes = context.into_classes();

        Ok(ApiDocumentation {
            id,
            title: api.title.clone(),
            description: api.description.clone(),
            entry_point,
            entry_point_class,
            classes,
            supported_classes,
            resources,
        })
    }
}
