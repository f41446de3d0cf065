// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_model::{
    OperationDefinition, ParameterDefinition, ParameterSource, PrimitiveType, ResolvedApi,
    ResourceDefinition, ResultTarget, TypeGraph, TypeRef, Verb,
};
use indexmap::IndexSet;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::binding::{BindingPolicy, DefaultBindingPolicy};
use crate::cache::RouteCache;
use crate::descriptor::{ArgumentDescriptor, OperationDescriptor, ResultDescriptor};
use crate::error::RouteError;
use crate::matcher::{RouteMatcher, RoutePattern};
use crate::naming::{infer_route, join_path, resource_segment};
use crate::table::RouteTable;

pub const PAGE_VARIABLE: &str = "page";
pub const ITEMS_PER_PAGE_VARIABLE: &str = "itemsPerPage";
pub const CONTENT_RANGE_HEADER: &str = "Content-Range";

const DEFAULT_PATH_VALUE: &str = "[^/?#]+";

/// Turns resource operations into routable operation descriptors.
pub struct RouteSynthesizer {
    base_path: String,
    policy: Arc<dyn BindingPolicy>,
    cache: Arc<RouteCache>,
}

impl RouteSynthesizer {
    pub fn new(base_uri: &Url) -> Self {
        Self {
            base_path: base_uri.path().to_string(),
            policy: Arc::new(DefaultBindingPolicy),
            cache: Arc::new(RouteCache::new()),
        }
    }

    pub fn with_policy(mut self, policy: impl BindingPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Share a cache with other synthesizers.
    pub fn with_cache(mut self, cache: Arc<RouteCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<RouteCache> {
        &self.cache
    }

    /// Route of the resource itself: its explicit route or its kebab-cased plural, under the base
    /// path.
    pub fn resource_prefix(&self, resource: &ResourceDefinition) -> String {
        let segment = match &resource.route {
            Some(route) => route.clone(),
            None => resource_segment(&resource.type_name),
        };
        join_path([self.base_path.as_str(), segment.as_str()])
    }

    /// Descriptors for every operation of a resource in declaration order, synthesized once per
    /// cache.
    ///
    /// Entries are keyed by API title, base path and resource type, so APIs sharing a cache need
    /// distinct titles.
    #[instrument(skip_all, fields(resource = %resource.type_name))]
    pub fn synthesize_resource(
        &self,
        api: &ResolvedApi,
        resource: &ResourceDefinition,
    ) -> Result<Arc<Vec<OperationDescriptor>>, RouteError> {
        let types = &api.types;
        let key = format!("{} {} {}", api.title, self.base_path, resource.type_name);

        self.cache.descriptors(&key, || {
            let mut descriptors = vec![];
            for operation in &resource.operations {
                descriptors.extend(self.synthesize_operation(resource, operation, types)?);
            }
            debug!(
                "Synthesized {} route(s) for `{}`",
                descriptors.len(),
                resource.type_name
            );
            Ok(descriptors)
        })
    }

    /// Routes of every resource of the API, in declaration order.
    #[instrument(skip_all, fields(api = %api.title))]
    pub fn route_table(&self, api: &ResolvedApi) -> Result<RouteTable, RouteError> {
        let mut operations = vec![];
        for resource in &api.resources {
            operations.extend(
                self.synthesize_resource(api, resource)?
                    .iter()
                    .cloned(),
            );
        }
        Ok(RouteTable::new(operations))
    }

    /// One descriptor per verb of the operation.
    pub fn synthesize_operation(
        &self,
        resource: &ResourceDefinition,
        operation: &OperationDefinition,
        types: &TypeGraph,
    ) -> Result<Vec<OperationDescriptor>, RouteError> {
        let inferred = infer_route(&operation.name);

        let mut verbs: IndexSet<Verb> = operation.verbs.iter().copied().collect();
        if verbs.is_empty() {
            verbs.insert(inferred.verb);
        }

        let segment = operation.route.clone().or(inferred.segment);

        let paged = verbs.contains(&Verb::Get)
            && operation.paged.unwrap_or_else(|| {
                operation
                    .body_result()
                    .is_some_and(|result| result.is_list())
            });

        let operation_id = format!("{}.{}", resource.type_name, operation.name);
        let arguments = Arc::new(self.arguments(&operation_id, operation, types, paged));
        let results = Arc::new(results(operation, paged));

        let (template, matcher) = self.route(
            &operation_id,
            &self.resource_prefix(resource),
            segment.as_deref(),
            &arguments,
        )?;

        trace!("{operation_id}: {verbs:?} {template}");

        Ok(verbs
            .iter()
            .map(|verb| OperationDescriptor {
                id: if verbs.len() > 1 {
                    format!("{operation_id}.{}", verb.as_str().to_lowercase())
                } else {
                    operation_id.clone()
                },
                resource: resource.type_name.clone(),
                method_name: operation.name.clone(),
                verb: *verb,
                template: template.clone(),
                matcher: matcher.clone(),
                arguments: arguments.clone(),
                results: results.clone(),
                media_types: operation.media_types.clone(),
                paged,
            })
            .collect())
    }

    fn arguments(
        &self,
        operation_id: &str,
        operation: &OperationDefinition,
        types: &TypeGraph,
        paged: bool,
    ) -> Vec<ArgumentDescriptor> {
        let mut arguments: Vec<ArgumentDescriptor> = operation
            .parameters
            .iter()
            .map(|parameter| {
                let source = parameter
                    .source
                    .or_else(|| self.policy.source(parameter, types));

                if source.is_none() {
                    debug!(
                        "Parameter `{}` of `{operation_id}` is not bound from the request",
                        parameter.name
                    );
                }

                let in_template = matches!(
                    source,
                    Some(ParameterSource::Path | ParameterSource::Query)
                );

                ArgumentDescriptor {
                    parameter: parameter.clone(),
                    source,
                    variable: in_template.then(|| parameter.name.clone()),
                    identity: source == Some(ParameterSource::Path)
                        && self.policy.is_identity(parameter),
                    implicit: false,
                }
            })
            .collect();

        if paged {
            for name in [PAGE_VARIABLE, ITEMS_PER_PAGE_VARIABLE] {
                if arguments.iter().all(|a| a.parameter.name != name) {
                    arguments.push(ArgumentDescriptor {
                        parameter: ParameterDefinition::new(
                            name,
                            TypeRef::from(PrimitiveType::Int).optional(),
                        )
                        .from_source(ParameterSource::Query),
                        source: Some(ParameterSource::Query),
                        variable: Some(name.to_string()),
                        identity: false,
                        implicit: true,
                    });
                }
            }
        }

        arguments
    }

    /// The template and matcher of an operation.
    ///
    /// Path variables named in the route (`/{id}/friends`) are placed where the route puts them.
    /// Otherwise, identity variables come right after the resource prefix, followed by the
    /// route segment and the remaining path variables.
    fn route(
        &self,
        operation_id: &str,
        prefix: &str,
        segment: Option<&str>,
        arguments: &[ArgumentDescriptor],
    ) -> Result<(String, RouteMatcher), RouteError> {
        let path_arguments: Vec<&ArgumentDescriptor> = arguments
            .iter()
            .filter(|a| a.source == Some(ParameterSource::Path))
            .collect();

        let mut pattern = RoutePattern::new(operation_id);
        pattern.literal(prefix);

        let mut placed: Vec<&str> = vec![];

        match segment {
            Some(route) if route.contains('{') => {
                for part in route.split('/').filter(|p| !p.is_empty()) {
                    match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                        Some(name) => {
                            let argument = path_arguments
                                .iter()
                                .find(|a| a.parameter.name == name)
                                .ok_or_else(|| RouteError::InvalidRoute {
                                    operation: operation_id.to_string(),
                                    route: route.to_string(),
                                    message: format!("`{name}` is not a path parameter"),
                                })?;
                            add_path_variable(&mut pattern, argument)?;
                            placed.push(name);
                        }
                        None if part.contains(['{', '}']) => {
                            return Err(RouteError::InvalidRoute {
                                operation: operation_id.to_string(),
                                route: route.to_string(),
                                message: format!("`{part}` must be a literal or a whole variable"),
                            });
                        }
                        None => pattern.literal(part),
                    }
                }
            }
            _ => {
                for argument in path_arguments.iter().filter(|a| a.identity) {
                    add_path_variable(&mut pattern, argument)?;
                    placed.push(&argument.parameter.name);
                }
                if let Some(segment) = segment {
                    pattern.literal(segment);
                }
            }
        }

        for argument in path_arguments.iter() {
            if !placed.contains(&argument.parameter.name.as_str()) {
                add_path_variable(&mut pattern, argument)?;
            }
        }

        for argument in arguments
            .iter()
            .filter(|a| a.source == Some(ParameterSource::Query))
        {
            pattern.query_variable(&argument.parameter.name, argument.is_required())?;
        }

        pattern.finish(&self.cache)
    }
}

fn add_path_variable(
    pattern: &mut RoutePattern<'_>,
    argument: &ArgumentDescriptor,
) -> Result<(), RouteError> {
    let value_pattern = argument
        .parameter
        .typ
        .as_primitive()
        .map(|p| p.path_pattern())
        .unwrap_or(DEFAULT_PATH_VALUE);
    pattern.path_variable(&argument.parameter.name, value_pattern)
}

fn results(operation: &OperationDefinition, paged: bool) -> Vec<ResultDescriptor> {
    let mut results: Vec<ResultDescriptor> = operation
        .results
        .iter()
        .map(|result| ResultDescriptor {
            typ: result.typ.clone(),
            target: result.target.clone(),
            implicit: false,
        })
        .collect();

    let declares_range = results.iter().any(|r| {
        matches!(&r.target, ResultTarget::Header(name) if name.eq_ignore_ascii_case(CONTENT_RANGE_HEADER))
    });

    if paged && !declares_range {
        results.push(ResultDescriptor {
            typ: PrimitiveType::String.into(),
            target: ResultTarget::Header(CONTENT_RANGE_HEADER.to_string()),
            implicit: true,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_model::{ApiModel, MemberDefinition, ResultDefinition, TypeDefinition};
    use multiplatform_test::multiplatform_test;

    fn api() -> ResolvedApi {
        let person = TypeRef::named("Person");
        let people = TypeRef::list(person.clone());

        ApiModel::new("People")
            .with_type(
                TypeDefinition::new("Person")
                    .with_member(MemberDefinition::key("id", PrimitiveType::Int))
                    .with_member(MemberDefinition::new("name", PrimitiveType::String)),
            )
            .with_type(TypeDefinition::new("Principal").context())
            .with_resource(
                ResourceDefinition::new("Person")
                    .with_operation(OperationDefinition::new("list").returning(people.clone()))
                    .with_operation(
                        OperationDefinition::new("getById")
                            .with_param(ParameterDefinition::new("id", PrimitiveType::Int))
                            .returning(person.clone()),
                    )
                    .with_operation(
                        OperationDefinition::new("listActive")
                            .returning(people.clone())
                            .with_paging(false),
                    )
                    .with_operation(
                        OperationDefinition::new("updateEmail")
                            .with_verb(Verb::Put)
                            .with_verb(Verb::Patch)
                            .with_param(ParameterDefinition::new("id", PrimitiveType::Int))
                            .with_param(
                                ParameterDefinition::new("email", PrimitiveType::String)
                                    .from_source(ParameterSource::Body),
                            )
                            .with_param(ParameterDefinition::new(
                                "principal",
                                TypeRef::named("Principal"),
                            ))
                            .returning(person.clone()),
                    )
                    .with_operation(
                        OperationDefinition::new("listFriends")
                            .with_param(ParameterDefinition::new(
                                "since",
                                TypeRef::from(PrimitiveType::Date).optional(),
                            ))
                            .with_param(ParameterDefinition::new("id", PrimitiveType::Int))
                            .returning(people.clone()),
                    )
                    .with_operation(
                        OperationDefinition::new("avatar")
                            .with_route("{id}/avatar")
                            .with_param(ParameterDefinition::new("id", PrimitiveType::Int))
                            .with_result(ResultDefinition::body(PrimitiveType::Blob)),
                    )
                    .with_operation(
                        OperationDefinition::new("search")
                            .with_route("search")
                            .with_param(ParameterDefinition::new("q", PrimitiveType::String))
                            .returning(people),
                    ),
            )
            .resolve()
            .unwrap()
    }

    fn synthesizer() -> RouteSynthesizer {
        RouteSynthesizer::new(&Url::parse("http://example.com/").unwrap())
    }

    fn table() -> RouteTable {
        synthesizer().route_table(&api()).unwrap()
    }

    /// Expand a template the way a client would, giving every variable in `with` the value `1`.
    fn expand(template: &str, with: &[&str]) -> String {
        let mut expanded = String::new();
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            expanded.push_str(&rest[..start]);
            let end = start + rest[start..].find('}').unwrap();
            let expression = &rest[start + 1..end];

            match expression.strip_prefix('?') {
                Some(names) => {
                    let pairs: Vec<String> = names
                        .split(',')
                        .filter(|name| with.contains(name))
                        .map(|name| format!("{name}=1"))
                        .collect();
                    if !pairs.is_empty() {
                        expanded.push('?');
                        expanded.push_str(&pairs.join("&"));
                    }
                }
                None => expanded.push('1'),
            }
            rest = &rest[end + 1..];
        }
        expanded.push_str(rest);
        expanded
    }

    #[multiplatform_test]
    fn paged_list() {
        let table = table();
        let list = table.get("Person.list").unwrap();

        assert_eq!(list.verb, Verb::Get);
        assert_eq!(list.template, "/people{?page,itemsPerPage}");
        assert!(list.paged);
        assert!(list.is_collection_read());

        assert!(list.matcher.is_match("/people?page=2&itemsPerPage=20"));
        assert!(list.matcher.is_match("/people?itemsPerPage=20&page=2"));
        assert!(list.matcher.is_match("/people"));
        assert!(!list.matcher.is_match("/people/extra"));

        let implicit: Vec<&str> = list
            .arguments
            .iter()
            .filter(|a| a.implicit)
            .map(|a| a.parameter.name.as_str())
            .collect();
        assert_eq!(implicit, vec!["page", "itemsPerPage"]);
        assert!(list.arguments.iter().all(|a| !a.is_required()));

        let (header, result) = list.header_results().next().unwrap();
        assert_eq!(header, CONTENT_RANGE_HEADER);
        assert!(result.implicit);
    }

    #[multiplatform_test]
    fn inferred_verbs_and_routes() {
        let table = table();

        let active = table.get("Person.listActive").unwrap();
        assert_eq!(active.verb, Verb::Get);
        assert_eq!(active.template, "/people/active");
        assert!(!active.paged);
        assert!(active.header_results().next().is_none());

        let by_id = table.get("Person.getById").unwrap();
        assert_eq!(by_id.template, "/people/{id}");
        assert!(by_id.arguments[0].identity && by_id.arguments[0].is_required());
        assert!(!by_id.is_collection_read());

        let search = table.get("Person.search").unwrap();
        assert_eq!(search.template, "/people/search{?q,page,itemsPerPage}");
        assert!(search.matcher.is_match("/people/search?page=1&q=ada"));
        assert!(!search.matcher.is_match("/people/search?page=1"));
    }

    #[multiplatform_test]
    fn one_descriptor_per_declared_verb() {
        let table = table();

        let put = table.get("Person.updateEmail.put").unwrap();
        let patch = table.get("Person.updateEmail.patch").unwrap();

        assert_eq!((put.verb, patch.verb), (Verb::Put, Verb::Patch));
        assert_eq!(put.template, "/people/{id}/email");
        assert_eq!(put.template, patch.template);
        assert!(Arc::ptr_eq(&put.arguments, &patch.arguments));
        assert!(table.get("Person.updateEmail").is_none());
    }

    #[multiplatform_test]
    fn repeated_verbs_are_synthesized_once() {
        let api = api();
        let resource = ResourceDefinition::new("Person");
        let touch = OperationDefinition::new("touch")
            .with_verb(Verb::Put)
            .with_verb(Verb::Post)
            .with_verb(Verb::Put);

        let ids: Vec<String> = synthesizer()
            .synthesize_operation(&resource, &touch, &api.types)
            .unwrap()
            .into_iter()
            .map(|descriptor| descriptor.id)
            .collect();

        assert_eq!(ids, vec!["Person.touch.put", "Person.touch.post"]);
    }

    #[multiplatform_test]
    fn unbound_parameters_are_left_out() {
        let table = table();
        let put = table.get("Person.updateEmail.put").unwrap();

        let principal = &put.arguments[2];
        assert_eq!(principal.source, None);
        assert!(!principal.in_template());

        let email = &put.arguments[1];
        assert_eq!(email.source, Some(ParameterSource::Body));
        assert_eq!(email.variable, None);
        assert_eq!(put.body_arguments().count(), 1);
    }

    #[multiplatform_test]
    fn identity_follows_the_resource_prefix() {
        let table = table();
        let friends = table.get("Person.listFriends").unwrap();

        assert_eq!(
            friends.template,
            "/people/{id}/friends{?since,page,itemsPerPage}"
        );

        let bindings = friends
            .matcher
            .bindings("/people/7/friends?since=2024-01-01")
            .unwrap();
        assert_eq!(bindings.get("id"), Some("7"));
        assert_eq!(bindings.get("since"), Some("2024-01-01"));
    }

    #[multiplatform_test]
    fn explicit_route_places_variables() {
        let table = table();
        let avatar = table.get("Person.avatar").unwrap();

        assert_eq!(avatar.template, "/people/{id}/avatar");
        assert!(avatar.matcher.is_match("/people/3/avatar"));
        assert!(!avatar.matcher.is_match("/people/avatar/3"));
    }

    #[multiplatform_test]
    fn malformed_explicit_routes() {
        let api = api();
        let resource = ResourceDefinition::new("Person").with_operation(
            OperationDefinition::new("avatar")
                .with_route("{missing}/avatar")
                .with_param(ParameterDefinition::new("id", PrimitiveType::Int)),
        );

        assert!(matches!(
            synthesizer().synthesize_resource(&api, &resource),
            Err(RouteError::InvalidRoute { .. })
        ));

        let resource = ResourceDefinition::new("Person").with_operation(
            OperationDefinition::new("avatar")
                .with_route("img{id}")
                .with_param(ParameterDefinition::new("id", PrimitiveType::Int)),
        );
        assert!(matches!(
            synthesizer().synthesize_resource(&api, &resource),
            Err(RouteError::InvalidRoute { .. })
        ));
    }

    #[multiplatform_test]
    fn templates_and_matchers_agree() {
        for operation in table().iter() {
            let variables: Vec<&str> = operation
                .template_arguments()
                .filter_map(|a| a.variable.as_deref())
                .collect();
            let required: Vec<&str> = operation
                .template_arguments()
                .filter(|a| a.is_required())
                .filter_map(|a| a.variable.as_deref())
                .collect();

            for uri in [
                expand(&operation.template, &variables),
                expand(&operation.template, &required),
            ] {
                assert!(
                    operation.matcher.is_match(&uri),
                    "{} does not accept {uri}",
                    operation.id
                );
            }
        }
    }

    #[multiplatform_test]
    fn find_returns_the_first_match_with_bindings() {
        let table = table();

        let found = table.find(Verb::Get, "/people/42").unwrap();
        assert_eq!(found.operation.id, "Person.getById");
        assert_eq!(found.bindings.get("id"), Some("42"));

        // `active` is not an Int, so `getById` passes it on
        let found = table.find(Verb::Get, "/people/active").unwrap();
        assert_eq!(found.operation.id, "Person.listActive");

        let found = table.find(Verb::Patch, "/people/42/email").unwrap();
        assert_eq!(found.operation.id, "Person.updateEmail.patch");

        assert!(table.find(Verb::Delete, "/people/42").is_none());
        assert!(table.find(Verb::Get, "/people/42/unknown").is_none());
    }

    #[multiplatform_test]
    fn routes_live_under_the_base_path() {
        let synthesizer =
            RouteSynthesizer::new(&Url::parse("http://example.com/api/v1/").unwrap());
        let table = synthesizer.route_table(&api()).unwrap();

        assert_eq!(
            table.get("Person.list").unwrap().template,
            "/api/v1/people{?page,itemsPerPage}"
        );

        let explicit = ResourceDefinition::new("Person").with_route("/staff");
        assert_eq!(synthesizer.resource_prefix(&explicit), "/api/v1/staff");
    }

    #[multiplatform_test]
    fn descriptors_are_cached_per_resource() {
        let api = api();
        let synthesizer = synthesizer();

        let first = synthesizer
            .synthesize_resource(&api, &api.resources[0])
            .unwrap();
        let second = synthesizer
            .synthesize_resource(&api, &api.resources[0])
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(synthesizer.cache().cached_resources(), 1);
    }

    #[multiplatform_test]
    fn apis_sharing_a_cache_keep_their_own_routes() {
        let people = api();
        let mut staff = api();
        staff.title = "Staff".to_string();
        staff.resources = vec![
            ResourceDefinition::new("Person").with_operation(
                OperationDefinition::new("listActive")
                    .returning(TypeRef::list(TypeRef::named("Person"))),
            ),
        ];
        let synthesizer = synthesizer();

        synthesizer.route_table(&people).unwrap();
        let table = synthesizer.route_table(&staff).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("Person.listActive").is_some());
        assert_eq!(synthesizer.cache().cached_resources(), 2);
    }
}
