// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::{PrimitiveType, TypeRef};

use crate::class::{ClassDescription, ClassId, Restriction, SupportedProperty};
use crate::context::TypeScope;
use crate::error::DescriptionError;
use crate::strategy::TypeDescriptionStrategy;
use crate::vocabulary::{HYDRA_PROFILE, RDF_FIRST, RDF_REST};

/// Describes types as Hydra classes.
///
/// - Primitives become datatypes (`xsd:int`, ...).
/// - Collections become a class derived from `rdf:List` whose `rdf:first` values are the items
///   and whose `rdf:rest` values are the list class itself.
/// - Composite types become classes with one supported property per exposed member, and a
///   single-value restriction for every member that is not a collection.
#[derive(Debug, Default, Clone, Copy)]
pub struct HydraTypeDescriptionBuilder;

impl TypeDescriptionStrategy for HydraTypeDescriptionBuilder {
    fn name(&self) -> &str {
        "hydra"
    }

    fn profiles(&self) -> &[&str] {
        &[HYDRA_PROFILE]
    }

    fn describe(&self, scope: &mut TypeScope<'_, '_>) -> Result<ClassId, DescriptionError> {
        let typ = scope.current_type().required().clone();

        if let Some(existing) = scope.get(&typ) {
            return Ok(existing);
        }

        tracing::trace!("Describing `{typ}` at depth {}", scope.depth());

        match &typ {
            TypeRef::Primitive(primitive) => describe_primitive(scope, *primitive),
            TypeRef::List(item) => self.describe_list(scope, &typ, item),
            TypeRef::Named(name) => self.describe_composite(scope, &typ, name),
            TypeRef::Optional(_) => unreachable!("optional wrappers are removed above"),
        }
    }
}

fn describe_primitive(
    scope: &mut TypeScope<'_, '_>,
    primitive: PrimitiveType,
) -> Result<ClassId, DescriptionError> {
    scope.register(
        &TypeRef::Primitive(primitive),
        ClassDescription::datatype(primitive.datatype_iri(), primitive.name()),
        false,
    )
}

impl HydraTypeDescriptionBuilder {
    fn describe_list(
        &self,
        scope: &mut TypeScope<'_, '_>,
        typ: &TypeRef,
        item: &TypeRef,
    ) -> Result<ClassId, DescriptionError> {
        let list_class = {
            let id = scope.vocabulary().list_class_iri(item);
            ClassDescription::list(id, format!("{} list", item.required()))
        };
        let list = scope.register(typ, list_class, false)?;

        let item_class = self.describe(&mut scope.for_type(item)?)?;
        scope.add_dependency(typ, item);

        // The rest of a list is a list of the same kind
        let class = scope.class_mut(list);
        class
            .restrictions
            .push(Restriction::all_values_from(RDF_FIRST, item_class));
        class
            .restrictions
            .push(Restriction::all_values_from(RDF_REST, list));

        Ok(list)
    }

    fn describe_composite(
        &self,
        scope: &mut TypeScope<'_, '_>,
        typ: &TypeRef,
        name: &str,
    ) -> Result<ClassId, DescriptionError> {
        let types = scope.types();
        let documentation = scope.documentation();
        let definition = types
            .get(name)
            .ok_or_else(|| DescriptionError::UnknownType(name.to_string()))?;

        let class = ClassDescription::class(scope.vocabulary().class_iri(name), name)
            .with_description(documentation.type_description(definition));

        // Register before visiting members, so that members referring back to this type resolve
        // to this class
        let class_id = scope.register(typ, class, definition.is_graph_addressable())?;

        for member in definition.members.iter().filter(|m| m.is_exposed()) {
            let range = self.describe(&mut scope.for_type(&member.typ)?)?;
            let property_iri = scope.vocabulary().property_iri(name, &member.name);

            let property = SupportedProperty {
                id: property_iri.clone(),
                label: member.name.clone(),
                description: documentation.member_description(definition, member),
                readable: member.readable,
                writeable: member.writeable,
                required: member.key || !member.typ.is_optional(),
                key: member.key,
                range,
            };

            let class = scope.class_mut(class_id);
            class.supported_properties.push(property);
            if !member.typ.is_list() {
                class.restrictions.push(Restriction::single_value(property_iri));
            }

            scope.add_dependency(typ, &member.typ);
        }

        Ok(class_id)
    }
}
