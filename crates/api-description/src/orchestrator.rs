// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_model::{OperationDefinition, ResolvedApi, ResourceDefinition, TypeRef};
use common::config::SynthesisConfig;
use route_synthesis::{
    ArgumentDescriptor, ITEMS_PER_PAGE_VARIABLE, OperationDescriptor, PAGE_VARIABLE,
    RouteCache, RouteSynthesizer, RouteTable,
};
use tracing::{debug, instrument};
use type_description::vocabulary::{HYDRA_LIMIT, HYDRA_PAGE_INDEX};
use type_description::{
    ClassDescription, ClassId, DescriptionContext, DescriptionError, DocumentationProvider,
    ModelDocumentation, StrategyRegistry, TypeDescriptionStrategy, Vocabulary,
};
use url::Url;

use crate::document::{
    IriTemplate, IriTemplateMapping, OperationProperty, ResourceDocumentation,
    SupportedOperation, TemplatedLink,
};
use crate::error::ApiDescriptionError;
use crate::media::{DeclaredMediaTypes, MediaTypeProvider};

/// Documents the operations of resources, using the routes synthesized for them.
pub struct ApiDescriptionOrchestrator {
    config: SynthesisConfig,
    registry: StrategyRegistry,
    documentation: Arc<dyn DocumentationProvider>,
    media_types: Arc<dyn MediaTypeProvider>,
    route_cache: Arc<RouteCache>,
}

/// A resource described on its own.
#[derive(Debug, Clone)]
pub struct ResourceDescription {
    pub class: ClassId,
    pub classes: Vec<ClassDescription>,
    pub documentation: ResourceDocumentation,
}

impl ResourceDescription {
    pub fn class(&self, id: ClassId) -> &ClassDescription {
        &self.classes[id.index()]
    }

    pub fn resource_class(&self) -> &ClassDescription {
        self.class(self.class)
    }
}

impl ApiDescriptionOrchestrator {
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            config,
            registry: StrategyRegistry::default(),
            documentation: Arc::new(ModelDocumentation),
            media_types: Arc::new(DeclaredMediaTypes),
            route_cache: Arc::new(RouteCache::new()),
        }
    }

    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_documentation(
        mut self,
        documentation: impl DocumentationProvider + 'static,
    ) -> Self {
        self.documentation = Arc::new(documentation);
        self
    }

    pub fn with_media_types(mut self, media_types: impl MediaTypeProvider + 'static) -> Self {
        self.media_types = Arc::new(media_types);
        self
    }

    pub fn with_route_cache(mut self, route_cache: Arc<RouteCache>) -> Self {
        self.route_cache = route_cache;
        self
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// The API's own base address, else the configured one.
    pub fn base_uri(&self, api: &ResolvedApi) -> Url {
        api.base_uri
            .clone()
            .unwrap_or_else(|| self.config.base_uri.clone())
    }

    pub fn synthesizer(&self, api: &ResolvedApi) -> RouteSynthesizer {
        RouteSynthesizer::new(&self.base_uri(api)).with_cache(self.route_cache.clone())
    }

    pub fn route_table(&self, api: &ResolvedApi) -> Result<RouteTable, ApiDescriptionError> {
        Ok(self.synthesizer(api).route_table(api)?)
    }

    /// A fresh context for one top-level synthesis.
    pub fn context<'a>(&'a self, api: &'a ResolvedApi) -> DescriptionContext<'a> {
        DescriptionContext::new(
            &api.types,
            self.documentation.as_ref(),
            Vocabulary::new(&self.base_uri(api)),
            self.config.limits,
        )
    }

    /// The strategy for the requested profiles, else for the configured ones.
    pub fn strategy(
        &self,
        profiles: &[String],
    ) -> Result<&dyn TypeDescriptionStrategy, DescriptionError> {
        let requested = if profiles.is_empty() {
            self.config.profiles.as_slice()
        } else {
            profiles
        };
        self.registry.select(requested)
    }

    /// Describe one resource and its operations in a fresh context.
    #[instrument(skip(self, api))]
    pub fn describe_resource(
        &self,
        api: &ResolvedApi,
        type_name: &str,
        profiles: &[String],
    ) -> Result<ResourceDescription, ApiDescriptionError> {
        let resource = api
            .resource(type_name)
            .ok_or_else(|| ApiDescriptionError::UnknownResource(type_name.to_string()))?;
        let strategy = self.strategy(profiles)?;
        let synthesizer = self.synthesizer(api);
        let mut context = self.context(api);

        let (class, documentation) =
            self.describe_resource_in(&mut context, strategy, &synthesizer, api, resource)?;

        Ok(ResourceDescription {
            class,
            classes: context.into_classes(),
            documentation,
        })
    }

    /// Describe a resource within an ongoing synthesis.
    pub fn describe_resource_in(
        &self,
        context: &mut DescriptionContext<'_>,
        strategy: &dyn TypeDescriptionStrategy,
        synthesizer: &RouteSynthesizer,
        api: &ResolvedApi,
        resource: &ResourceDefinition,
    ) -> Result<(ClassId, ResourceDocumentation), ApiDescriptionError> {
        let descriptors = synthesizer.synthesize_resource(api, resource)?;

        let resource_type = TypeRef::named(&resource.type_name);
        let class_id = context.describe(strategy, &resource_type)?;

        let mut documentation = ResourceDocumentation::default();

        for descriptor in descriptors.iter() {
            let Some(definition) = resource
                .operations
                .iter()
                .find(|o| o.name == descriptor.method_name)
            else {
                continue;
            };

            let operation =
                self.describe_operation(context, strategy, resource, definition, descriptor)?;

            if descriptor.has_template_variables() {
                self.attach_through_link(
                    context,
                    strategy,
                    class_id,
                    descriptor,
                    &operation.id,
                    &mut documentation,
                )?;
            } else {
                context
                    .class_mut(class_id)
                    .supported_operations
                    .push(operation.id.clone());
            }

            documentation.operations.push(operation);
        }

        let requires_linked_data = context
            .requires_linked_data(&resource_type)
            .unwrap_or(false);
        let class = context.class_mut(class_id);
        if class.media_types.is_empty() {
            class.media_types = self.config.media_types.select(requires_linked_data).to_vec();
        }

        debug!(
            "Documented {} operation(s) of `{}`",
            documentation.operations.len(),
            resource.type_name
        );

        Ok((class_id, documentation))
    }

    fn describe_operation(
        &self,
        context: &mut DescriptionContext<'_>,
        strategy: &dyn TypeDescriptionStrategy,
        resource: &ResourceDefinition,
        definition: &OperationDefinition,
        descriptor: &OperationDescriptor,
    ) -> Result<SupportedOperation, ApiDescriptionError> {
        let mut requires_linked_data = false;

        let mut expects = vec![];
        for argument in descriptor.body_arguments() {
            let typ = &argument.parameter.typ;
            expects.push(context.describe(strategy, typ)?);
            requires_linked_data |= context.requires_linked_data(typ).unwrap_or(false);
        }

        let mut returns = vec![];
        if let Some(result) = descriptor.body_result() {
            let class = context.describe(strategy, &result.typ)?;
            requires_linked_data |= context.requires_linked_data(&result.typ).unwrap_or(false);
            returns.push(strategy.sub_class(context, class, &result.typ));
        }

        let mut returns_header = vec![];
        for (name, result) in descriptor.header_results() {
            returns_header.push((name.to_string(), context.describe(strategy, &result.typ)?));
        }

        let media_types = self
            .media_types
            .media_types(resource, definition)
            .unwrap_or_else(|| self.config.media_types.select(requires_linked_data).to_vec());

        Ok(SupportedOperation {
            id: operation_iri(context.vocabulary(), descriptor),
            label: descriptor.method_name.clone(),
            description: self.documentation.operation_description(resource, definition),
            method: descriptor.verb,
            expects,
            returns,
            returns_header,
            media_types,
            requires_linked_data,
        })
    }

    /// Reach the operation through the templated link for its template, creating the link (and
    /// its template) for the first operation using the template.
    ///
    /// Operations share a link only when their templates are equal and they agree on which
    /// variables are required.
    fn attach_through_link(
        &self,
        context: &mut DescriptionContext<'_>,
        strategy: &dyn TypeDescriptionStrategy,
        class_id: ClassId,
        descriptor: &OperationDescriptor,
        operation_id: &str,
        documentation: &mut ResourceDocumentation,
    ) -> Result<(), ApiDescriptionError> {
        let requirements: Vec<(String, bool)> = descriptor
            .template_arguments()
            .map(|argument| {
                let variable = template_variable(argument);
                let required = is_mapping_required(&variable, argument);
                (variable, required)
            })
            .collect();

        let existing_template = documentation
            .templates
            .iter()
            .find(|t| {
                t.template == descriptor.template
                    && t.mappings
                        .iter()
                        .map(|m| (m.variable.as_str(), m.required))
                        .eq(requirements.iter().map(|(v, r)| (v.as_str(), *r)))
            })
            .map(|t| t.id.clone());

        if let Some(template_id) = existing_template {
            if let Some(link) = documentation
                .links
                .iter_mut()
                .find(|l| l.template == template_id)
            {
                link.operations.push(operation_id.to_string());
            }
            return Ok(());
        }

        let index = documentation.links.len();
        let link_id = context
            .vocabulary()
            .term(&format!("{}/links/{index}", descriptor.resource));
        let template_id = context
            .vocabulary()
            .term(&format!("{}/templates/{index}", descriptor.resource));

        let mut mappings = vec![];
        for argument in descriptor.template_arguments() {
            mappings.push(self.mapping(
                context,
                strategy,
                class_id,
                descriptor,
                argument,
                documentation,
            )?);
        }

        documentation.templates.push(IriTemplate {
            id: template_id.clone(),
            template: descriptor.template.clone(),
            mappings,
        });
        documentation.links.push(TemplatedLink {
            id: link_id.clone(),
            template: template_id,
            operations: vec![operation_id.to_string()],
        });
        context.class_mut(class_id).links.push(link_id);

        Ok(())
    }

    /// Bind a template variable to the property its values stand for.
    fn mapping(
        &self,
        context: &mut DescriptionContext<'_>,
        strategy: &dyn TypeDescriptionStrategy,
        class_id: ClassId,
        descriptor: &OperationDescriptor,
        argument: &ArgumentDescriptor,
        documentation: &mut ResourceDocumentation,
    ) -> Result<IriTemplateMapping, ApiDescriptionError> {
        let variable = template_variable(argument);
        let required = is_mapping_required(&variable, argument);

        if let Some(property) = pagination_property(&variable) {
            return Ok(IriTemplateMapping {
                variable,
                required,
                property: property.to_string(),
            });
        }

        let class_property = context
            .class(class_id)
            .property_ignore_case(&variable)
            .map(|p| p.id.clone());

        let property = match class_property {
            Some(property) => property,
            None => {
                let id = context.vocabulary().term(&format!(
                    "{}.{}.{variable}",
                    descriptor.resource, descriptor.method_name
                ));
                if documentation.properties.iter().all(|p| p.id != id) {
                    let range = context.describe(strategy, &argument.parameter.typ)?;
                    documentation.properties.push(OperationProperty {
                        id: id.clone(),
                        label: variable.clone(),
                        range,
                    });
                }
                id
            }
        };

        Ok(IriTemplateMapping {
            variable,
            required,
            property,
        })
    }
}

fn template_variable(argument: &ArgumentDescriptor) -> String {
    argument
        .variable
        .clone()
        .unwrap_or_else(|| argument.parameter.name.clone())
}

fn pagination_property(variable: &str) -> Option<&'static str> {
    match variable {
        PAGE_VARIABLE => Some(HYDRA_PAGE_INDEX),
        ITEMS_PER_PAGE_VARIABLE => Some(HYDRA_LIMIT),
        _ => None,
    }
}

/// Pagination variables are never required.
fn is_mapping_required(variable: &str, argument: &ArgumentDescriptor) -> bool {
    pagination_property(variable).is_none() && argument.is_required()
}

/// `{vocabulary}Person/list`, or `{vocabulary}Person/update/put` for one verb of many.
pub(crate) fn operation_iri(vocabulary: &Vocabulary, descriptor: &OperationDescriptor) -> String {
    vocabulary.term(&descriptor.id.replace('.', "/"))
}
