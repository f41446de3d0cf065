// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Map, Value, json};
use type_description::vocabulary::PREFIXES;
use type_description::{ClassDescription, ClassId, ClassKind, RestrictionConstraint};

use crate::document::{
    ApiDocumentation, IriTemplate, OperationProperty, SupportedOperation, TemplatedLink,
};

const DCTERMS: (&str, &str) = ("dcterms", "http://purl.org/dc/terms/");

/// Encode the documentation as a flattened JSON-LD graph.
pub fn to_json_ld(documentation: &ApiDocumentation) -> Value {
    Encoder { documentation }.document()
}

struct Encoder<'d> {
    documentation: &'d ApiDocumentation,
}

impl Encoder<'_> {
    fn document(&self) -> Value {
        let documentation = self.documentation;

        let mut context = Map::new();
        for (prefix, namespace) in PREFIXES.iter().chain([&DCTERMS]) {
            context.insert(prefix.to_string(), json!(namespace));
        }

        let mut root = Map::new();
        root.insert("@id".into(), json!(documentation.id));
        root.insert("@type".into(), json!("hydra:ApiDocumentation"));
        root.insert("hydra:title".into(), json!(documentation.title));
        if let Some(description) = &documentation.description {
            root.insert("hydra:description".into(), json!(description));
        }
        root.insert(
            "hydra:entrypoint".into(),
            json!({ "@id": documentation.entry_point }),
        );
        root.insert(
            "hydra:supportedClass".into(),
            Value::Array(
                documentation
                    .supported_classes
                    .iter()
                    .map(|id| self.reference(*id))
                    .collect(),
            ),
        );

        let mut graph = vec![Value::Object(root)];

        // The entry point resource is an instance of the entry point class
        graph.push(json!({
            "@id": documentation.entry_point,
            "@type": documentation.class(documentation.entry_point_class).id,
        }));

        graph.extend(
            documentation
                .classes
                .iter()
                .filter(|class| class.kind != ClassKind::Datatype)
                .map(|class| self.class(class)),
        );

        let resources = &documentation.resources;
        graph.extend(resources.operations.iter().map(|o| self.operation(o)));
        graph.extend(resources.links.iter().map(link));
        graph.extend(resources.templates.iter().map(template));
        graph.extend(resources.properties.iter().map(|p| self.property(p)));

        json!({
            "@context": context,
            "@graph": graph,
        })
    }

    fn reference(&self, id: ClassId) -> Value {
        json!({ "@id": self.documentation.class(id).id })
    }

    fn class(&self, class: &ClassDescription) -> Value {
        let mut node = Map::new();
        node.insert("@id".into(), json!(class.id));
        node.insert("@type".into(), json!(class.rdf_type()));
        if let Some(label) = &class.label {
            node.insert("rdfs:label".into(), json!(label));
        }
        if let Some(description) = &class.description {
            node.insert("hydra:description".into(), json!(description));
        }

        let mut super_classes: Vec<Value> = class
            .implicit_super_class()
            .map(|iri| json!({ "@id": iri }))
            .into_iter()
            .chain(class.sub_class_of.iter().map(|id| self.reference(*id)))
            .collect();
        super_classes.extend(class.restrictions.iter().map(|restriction| {
            let mut node = Map::new();
            node.insert("@type".into(), json!("owl:Restriction"));
            node.insert(
                "owl:onProperty".into(),
                json!({ "@id": restriction.on_property }),
            );
            match restriction.constraint {
                RestrictionConstraint::AllValuesFrom(range) => {
                    node.insert("owl:allValuesFrom".into(), self.reference(range));
                }
                RestrictionConstraint::MaxCardinality(max) => {
                    node.insert("owl:maxCardinality".into(), json!(max));
                }
            }
            Value::Object(node)
        }));
        if !super_classes.is_empty() {
            node.insert("rdfs:subClassOf".into(), Value::Array(super_classes));
        }

        if class.kind == ClassKind::Subclass && class.single_value {
            node.insert("owl:maxCardinality".into(), json!(1));
        }

        let mut properties: Vec<Value> = class
            .supported_properties
            .iter()
            .map(|property| {
                let mut node = Map::new();
                node.insert("@type".into(), json!("hydra:SupportedProperty"));
                // Keys identify their subject
                let types = if property.key {
                    json!(["rdf:Property", "owl:InverseFunctionalProperty"])
                } else {
                    json!("rdf:Property")
                };
                node.insert(
                    "hydra:property".into(),
                    json!({
                        "@id": property.id,
                        "@type": types,
                        "rdfs:label": property.label,
                        "rdfs:range": self.reference(property.range),
                    }),
                );
                if let Some(description) = &property.description {
                    node.insert("hydra:description".into(), json!(description));
                }
                node.insert("hydra:required".into(), json!(property.required));
                node.insert("hydra:readable".into(), json!(property.readable));
                node.insert("hydra:writeable".into(), json!(property.writeable));
                Value::Object(node)
            })
            .collect();
        properties.extend(class.links.iter().map(|link| {
            json!({
                "@type": "hydra:SupportedProperty",
                "hydra:property": { "@id": link },
            })
        }));
        if !properties.is_empty() {
            node.insert("hydra:supportedProperty".into(), Value::Array(properties));
        }

        if !class.supported_operations.is_empty() {
            node.insert(
                "hydra:supportedOperation".into(),
                iri_references(&class.supported_operations),
            );
        }
        if !class.media_types.is_empty() {
            node.insert("dcterms:format".into(), json!(class.media_types));
        }

        Value::Object(node)
    }

    fn operation(&self, operation: &SupportedOperation) -> Value {
        let mut node = Map::new();
        node.insert("@id".into(), json!(operation.id));
        node.insert("@type".into(), json!("hydra:Operation"));
        node.insert("rdfs:label".into(), json!(operation.label));
        if let Some(description) = &operation.description {
            node.insert("hydra:description".into(), json!(description));
        }
        node.insert("hydra:method".into(), json!(operation.method.as_str()));
        if !operation.expects.is_empty() {
            node.insert("hydra:expects".into(), self.references(&operation.expects));
        }
        if !operation.returns.is_empty() {
            node.insert("hydra:returns".into(), self.references(&operation.returns));
        }
        if !operation.returns_header.is_empty() {
            node.insert(
                "hydra:returnsHeader".into(),
                json!(
                    operation
                        .returns_header
                        .iter()
                        .map(|(name, _)| name.as_str())
                        .collect::<Vec<_>>()
                ),
            );
        }
        node.insert("dcterms:format".into(), json!(operation.media_types));
        Value::Object(node)
    }

    fn property(&self, property: &OperationProperty) -> Value {
        json!({
            "@id": property.id,
            "@type": "rdf:Property",
            "rdfs:label": property.label,
            "rdfs:range": self.reference(property.range),
        })
    }

    fn references(&self, ids: &[ClassId]) -> Value {
        Value::Array(ids.iter().map(|id| self.reference(*id)).collect())
    }
}

fn iri_references(iris: &[String]) -> Value {
    Value::Array(iris.iter().map(|iri| json!({ "@id": iri })).collect())
}

fn link(link: &TemplatedLink) -> Value {
    json!({
        "@id": link.id,
        "@type": "hydra:TemplatedLink",
        "hydra:template": { "@id": link.template },
        "hydra:supportedOperation": iri_references(&link.operations),
    })
}

fn template(template: &IriTemplate) -> Value {
    json!({
        "@id": template.id,
        "@type": "hydra:IriTemplate",
        "hydra:template": template.template,
        "hydra:variableRepresentation": { "@id": "hydra:BasicRepresentation" },
        "hydra:mapping": template
            .mappings
            .iter()
            .map(|mapping| json!({
                "@type": "hydra:IriTemplateMapping",
                "hydra:variable": mapping.variable,
                "hydra:property": { "@id": mapping.property },
                "hydra:required": mapping.required,
            }))
            .collect::<Vec<_>>(),
    })
}
