// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_description::{
    ApiDescriptionOrchestrator, ContentRange, ENTRY_POINT_CLASS, EntryPointAggregator,
    to_json_ld,
};
use api_model::{ApiModel, ResolvedApi, Verb};
use common::MapEnvironment;
use common::config::SynthesisConfig;
use serde_json::Value;

const PEOPLE: &str = r#"{
    "title": "People",
    "description": "Everyone we know",
    "types": [
        {
            "name": "Person",
            "members": [
                {"name": "id", "type": "Int", "key": true, "writeable": false},
                {"name": "name", "type": "String"}
            ]
        }
    ],
    "resources": [
        {
            "type": "Person",
            "operations": [
                {"name": "list", "results": [{"type": "[Person]"}]}
            ]
        }
    ]
}"#;

fn api() -> ResolvedApi {
    ApiModel::from_json(PEOPLE).unwrap().resolve().unwrap()
}

fn config() -> SynthesisConfig {
    let env = MapEnvironment::from([
        ("HYDRO_BASE_URI", "http://example.com/"),
        ("HYDRO_PROFILES", "http://www.w3.org/ns/hydra/core#"),
    ]);
    SynthesisConfig::from_env(&env).unwrap()
}

/// Every string the template produces for the given variables, each bound to `1`.
fn expand(template: &str, variables: &[&str]) -> String {
    let (path, query) = template.split_once("{?").unwrap_or((template, ""));
    let pairs: Vec<String> = query
        .trim_end_matches('}')
        .split(',')
        .filter(|name| variables.contains(name))
        .map(|name| format!("{name}=1"))
        .collect();

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", pairs.join("&"))
    }
}

#[test]
fn paged_people_list() {
    let api = api();
    let orchestrator = ApiDescriptionOrchestrator::new(config());
    let documentation = EntryPointAggregator::new(&orchestrator)
        .describe(&api, &[])
        .unwrap();

    // One class, with two properties
    let classes: Vec<_> = documentation.type_classes().collect();
    assert_eq!(classes.len(), 1);
    let person = classes[0];
    assert_eq!(person.id, "http://example.com/vocab#Person");
    assert_eq!(person.supported_properties.len(), 2);

    let id = person.property("id").unwrap();
    assert!(id.key && id.required && id.readable && !id.writeable);
    let name = person.property("name").unwrap();
    assert!(!name.key && name.required && name.writeable);

    // One templated operation, with optional paging variables
    let resources = &documentation.resources;
    assert_eq!(resources.operations.len(), 1);
    assert_eq!(resources.links.len(), 1);
    assert_eq!(person.links, vec![resources.links[0].id.clone()]);
    assert!(person.supported_operations.is_empty());

    let template = &resources.templates[0];
    assert_eq!(template.template, "/people{?page,itemsPerPage}");
    let variables: Vec<&str> = template
        .mappings
        .iter()
        .map(|m| m.variable.as_str())
        .collect();
    assert_eq!(variables, vec!["page", "itemsPerPage"]);
    assert!(template.mappings.iter().all(|m| !m.required));

    let operation = &resources.operations[0];
    assert_eq!(operation.method, Verb::Get);
    assert_eq!(operation.returns_header[0].0, "Content-Range");

    // The route accepts what the template generates, and nothing else
    let routes = orchestrator.route_table(&api).unwrap();
    let found = routes
        .find(Verb::Get, "/people?page=2&itemsPerPage=20")
        .unwrap();
    assert_eq!(found.bindings.get("page"), Some("2"));
    assert_eq!(found.bindings.get("itemsPerPage"), Some("20"));
    assert!(routes.find(Verb::Get, "/people/extra").is_none());

    for subset in [
        vec![],
        vec!["page"],
        vec!["itemsPerPage"],
        vec!["page", "itemsPerPage"],
    ] {
        let uri = expand(&template.template, &subset);
        assert!(routes.find(Verb::Get, &uri).is_some(), "{uri}");
    }

    // A page of the listing
    let range = ContentRange::for_page(2, 20, Some(45)).unwrap();
    assert_eq!(range.to_string(), "20-39/45");
}

#[test]
fn entry_point_links_collections() {
    let api = api();
    let orchestrator = ApiDescriptionOrchestrator::new(config());
    let documentation = EntryPointAggregator::new(&orchestrator)
        .describe(&api, &[])
        .unwrap();

    assert_eq!(documentation.id, "http://example.com/vocab");
    assert_eq!(documentation.entry_point, "http://example.com/");

    let entry_point = documentation.class(documentation.entry_point_class);
    assert_eq!(entry_point.label.as_deref(), Some(ENTRY_POINT_CLASS));
    assert_eq!(entry_point.links, vec![documentation.resources.links[0].id.clone()]);
    assert!(
        documentation
            .supported_classes
            .contains(&documentation.entry_point_class)
    );
}

fn node<'g>(graph: &'g [Value], id: &str) -> &'g Value {
    graph
        .iter()
        .find(|node| node["@id"] == id)
        .unwrap_or_else(|| panic!("no node {id}"))
}

#[test]
fn json_ld_document() {
    let api = api();
    let orchestrator = ApiDescriptionOrchestrator::new(config());
    let documentation = EntryPointAggregator::new(&orchestrator)
        .describe(&api, &[])
        .unwrap();

    let document = to_json_ld(&documentation);

    assert_eq!(
        document["@context"]["hydra"],
        "http://www.w3.org/ns/hydra/core#"
    );

    let graph = document["@graph"].as_array().unwrap();

    let root = node(graph, "http://example.com/vocab");
    assert_eq!(root["@type"], "hydra:ApiDocumentation");
    assert_eq!(root["hydra:title"], "People");
    assert_eq!(root["hydra:description"], "Everyone we know");

    let person = node(graph, "http://example.com/vocab#Person");
    assert_eq!(person["@type"], "hydra:Class");
    // Two members and the templated link
    assert_eq!(person["hydra:supportedProperty"].as_array().unwrap().len(), 3);
    let restrictions = person["rdfs:subClassOf"].as_array().unwrap();
    assert_eq!(restrictions.len(), 2);
    assert!(restrictions.iter().all(|r| r["owl:maxCardinality"] == 1));

    let list = node(graph, "http://example.com/vocab#Person-list");
    let list_super_classes = list["rdfs:subClassOf"].as_array().unwrap();
    assert_eq!(list_super_classes[0]["@id"], "rdf:List");
    assert_eq!(list_super_classes[1]["owl:onProperty"]["@id"], "rdf:first");
    assert_eq!(
        list_super_classes[2]["owl:allValuesFrom"]["@id"],
        "http://example.com/vocab#Person-list"
    );

    let template = graph
        .iter()
        .find(|node| node["@type"] == "hydra:IriTemplate")
        .unwrap();
    assert_eq!(template["hydra:template"], "/people{?page,itemsPerPage}");
    let mapping = template["hydra:mapping"].as_array().unwrap();
    assert_eq!(mapping[0]["hydra:property"]["@id"], "hydra:pageIndex");
    assert_eq!(mapping[1]["hydra:property"]["@id"], "hydra:limit");
    assert_eq!(mapping[1]["hydra:required"], false);

    let operation = graph
        .iter()
        .find(|node| node["@type"] == "hydra:Operation")
        .unwrap();
    assert_eq!(operation["hydra:method"], "GET");
    assert_eq!(operation["hydra:returnsHeader"][0], "Content-Range");
}

#[test]
fn requested_profiles_select_the_strategy() {
    let api = api();
    let orchestrator = ApiDescriptionOrchestrator::new(config());
    let aggregator = EntryPointAggregator::new(&orchestrator);

    assert!(
        aggregator
            .describe(&api, &["http://www.w3.org/ns/hydra/core".to_string()])
            .is_ok()
    );
    assert!(
        aggregator
            .describe(&api, &["https://schema.org/".to_string()])
            .is_err()
    );
}
