// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Memoization for one synthesis.
//!
//! A `DescriptionContext` owns every class built during one top-level synthesis and remembers,
//! for each described type, its class and whether its values must be graph nodes. Builders
//! register a composite class *before* describing its members, so a type that (directly or
//! through other types) refers back to itself finds its own, still incomplete, class instead of
//! recursing forever.
//!
//! A context is owned by the call tree that created it and is never shared between threads.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use api_model::{TypeGraph, TypeRef};
use common::config::SynthesisLimits;

use crate::class::{ClassDescription, ClassId};
use crate::documentation::DocumentationProvider;
use crate::error::DescriptionError;
use crate::strategy::TypeDescriptionStrategy;
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy)]
struct DescribedType {
    class: ClassId,
    requires_linked_data: bool,
}

pub struct DescriptionContext<'a> {
    types: &'a TypeGraph,
    documentation: &'a dyn DocumentationProvider,
    vocabulary: Vocabulary,
    limits: SynthesisLimits,
    classes: Vec<ClassDescription>,
    described: HashMap<String, DescribedType>,
    /// Reverse member edges: described type -> types whose description refers to it
    dependents: HashMap<String, Vec<String>>,
    blank_nodes: usize,
}

impl<'a> DescriptionContext<'a> {
    pub fn new(
        types: &'a TypeGraph,
        documentation: &'a dyn DocumentationProvider,
        vocabulary: Vocabulary,
        limits: SynthesisLimits,
    ) -> Self {
        Self {
            types,
            documentation,
            vocabulary,
            limits,
            classes: vec![],
            described: HashMap::new(),
            dependents: HashMap::new(),
            blank_nodes: 0,
        }
    }

    pub fn types(&self) -> &'a TypeGraph {
        self.types
    }

    pub fn documentation(&self) -> &'a dyn DocumentationProvider {
        self.documentation
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Describe `typ` with `strategy`, or return the class already built for it.
    pub fn describe(
        &mut self,
        strategy: &dyn TypeDescriptionStrategy,
        typ: &TypeRef,
    ) -> Result<ClassId, DescriptionError> {
        if let Some(class) = self.get(typ) {
            return Ok(class);
        }
        strategy.describe(&mut self.for_type(typ))
    }

    /// A scope for describing `typ` at the top of the type graph.
    pub fn for_type(&mut self, typ: &TypeRef) -> TypeScope<'_, 'a> {
        TypeScope {
            context: self,
            current: typ.clone(),
            depth: 0,
        }
    }

    pub fn contains(&self, typ: &TypeRef) -> bool {
        self.described.contains_key(&typ.description_key())
    }

    pub fn get(&self, typ: &TypeRef) -> Option<ClassId> {
        self.described
            .get(&typ.description_key())
            .map(|described| described.class)
    }

    /// Whether values of `typ` must be graph nodes. `None` if `typ` was never described.
    pub fn requires_linked_data(&self, typ: &TypeRef) -> Option<bool> {
        self.described
            .get(&typ.description_key())
            .map(|described| described.requires_linked_data)
    }

    /// Record the class built for `typ`.
    ///
    /// If `typ` is already registered, the existing class is kept and returned and `class` is
    /// discarded.
    pub fn register(
        &mut self,
        typ: &TypeRef,
        class: ClassDescription,
        requires_linked_data: bool,
    ) -> Result<ClassId, DescriptionError> {
        let key = typ.description_key();

        if let Some(existing) = self.described.get(&key) {
            return Ok(existing.class);
        }

        if self.described.len() >= self.limits.max_types {
            tracing::warn!(
                "Type limit of {} reached while describing `{key}`",
                self.limits.max_types
            );
            return Err(DescriptionError::TypeLimitExceeded {
                limit: self.limits.max_types,
            });
        }

        let class = self.add_class(class);
        self.described.insert(
            key,
            DescribedType {
                class,
                requires_linked_data,
            },
        );
        Ok(class)
    }

    /// Flag `typ` as requiring linked data. The flag is never cleared.
    ///
    /// Every type whose description depends on `typ` (see [`Self::add_dependency`]) is flagged as
    /// well, including types that are still being described.
    pub fn mark_requires_linked_data(&mut self, typ: &TypeRef) {
        let mut pending = vec![typ.description_key()];

        while let Some(key) = pending.pop() {
            let Some(described) = self.described.get_mut(&key) else {
                continue;
            };
            if described.requires_linked_data {
                continue;
            }
            described.requires_linked_data = true;

            if let Some(dependents) = self.dependents.get(&key) {
                pending.extend(dependents.iter().cloned());
            }
        }
    }

    /// Record that the description of `owner` refers to `dependency` (a member or item type).
    ///
    /// `owner` requires linked data whenever `dependency` does, now or once it is flagged later.
    pub fn add_dependency(&mut self, owner: &TypeRef, dependency: &TypeRef) {
        let owner_key = owner.description_key();
        let dependency_key = dependency.description_key();

        let dependents = self.dependents.entry(dependency_key).or_default();
        if !dependents.contains(&owner_key) {
            dependents.push(owner_key);
        }

        if self.requires_linked_data(dependency).unwrap_or(false) {
            self.mark_requires_linked_data(owner);
        }
    }

    /// Add a class that is not the description of a type (call-site subclasses, for example).
    pub fn add_class(&mut self, class: ClassDescription) -> ClassId {
        self.classes.push(class);
        ClassId(self.classes.len() - 1)
    }

    /// A fresh blank node label, unique within this context.
    pub fn next_blank_node(&mut self) -> String {
        let label = format!("_:b{}", self.blank_nodes);
        self.blank_nodes += 1;
        label
    }

    pub fn class(&self, id: ClassId) -> &ClassDescription {
        &self.classes[id.0]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassDescription {
        &mut self.classes[id.0]
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDescription)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (ClassId(index), class))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn into_classes(self) -> Vec<ClassDescription> {
        self.classes
    }
}

/// A view of a [`DescriptionContext`] focused on one type of the graph.
///
/// Scopes for member types are created with [`TypeScope::for_type`]; they share the memo table of
/// the context and track how deep in the type graph the builder is.
pub struct TypeScope<'c, 'a> {
    context: &'c mut DescriptionContext<'a>,
    current: TypeRef,
    depth: usize,
}

impl<'a> TypeScope<'_, 'a> {
    pub fn current_type(&self) -> &TypeRef {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A scope for a type nested directly inside the current one.
    pub fn for_type(&mut self, typ: &TypeRef) -> Result<TypeScope<'_, 'a>, DescriptionError> {
        let depth = self.depth + 1;
        let limit = self.context.limits.max_depth;

        if depth > limit {
            tracing::warn!("Depth limit of {limit} reached at `{typ}`");
            return Err(DescriptionError::DepthLimitExceeded {
                type_name: typ.to_string(),
                limit,
            });
        }

        Ok(TypeScope {
            context: &mut *self.context,
            current: typ.clone(),
            depth,
        })
    }
}

impl<'a> Deref for TypeScope<'_, 'a> {
    type Target = DescriptionContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.context
    }
}

impl DerefMut for TypeScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::ModelDocumentation;
    use api_model::PrimitiveType;
    use multiplatform_test::multiplatform_test;
    use url::Url;

    fn context<'a>(types: &'a TypeGraph, limits: SynthesisLimits) -> DescriptionContext<'a> {
        DescriptionContext::new(
            types,
            &ModelDocumentation,
            Vocabulary::new(&Url::parse("http://example.com/").unwrap()),
            limits,
        )
    }

    #[multiplatform_test]
    fn register_keeps_first_class() {
        let types = TypeGraph::default();
        let mut context = context(&types, SynthesisLimits::default());
        let person = TypeRef::named("Person");

        assert!(!context.contains(&person));
        assert_eq!(context.requires_linked_data(&person), None);

        let first = context
            .register(&person, ClassDescription::class("first", "Person"), false)
            .unwrap();
        let second = context
            .register(
                &person.clone().optional(),
                ClassDescription::class("second", "Person"),
                true,
            )
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(context.class(first).id, "first");
        assert_eq!(context.class_count(), 1);
        assert_eq!(context.requires_linked_data(&person), Some(false));
    }

    #[multiplatform_test]
    fn linked_data_flag_is_monotonic() {
        let types = TypeGraph::default();
        let mut context = context(&types, SynthesisLimits::default());
        let person = TypeRef::named("Person");

        context
            .register(&person, ClassDescription::class("p", "Person"), false)
            .unwrap();
        context.mark_requires_linked_data(&person);
        context
            .register(&person, ClassDescription::class("p", "Person"), false)
            .unwrap();

        assert_eq!(context.requires_linked_data(&person), Some(true));
    }

    #[multiplatform_test]
    fn linked_data_flag_reaches_dependents() {
        let types = TypeGraph::default();
        let mut context = context(&types, SynthesisLimits::default());
        let a = TypeRef::named("A");
        let b = TypeRef::named("B");
        let document = TypeRef::named("Document");

        for (typ, requires_linked_data) in [(&a, false), (&b, false), (&document, true)] {
            context
                .register(typ, ClassDescription::class("c", "C"), requires_linked_data)
                .unwrap();
        }

        // A <-> B, flagged only once A learns about Document
        context.add_dependency(&b, &a);
        context.add_dependency(&a, &b);
        assert_eq!(context.requires_linked_data(&b), Some(false));

        context.add_dependency(&a, &document);
        assert_eq!(context.requires_linked_data(&a), Some(true));
        assert_eq!(context.requires_linked_data(&b), Some(true));
    }

    #[multiplatform_test]
    fn type_limit() {
        let types = TypeGraph::default();
        let mut context = context(
            &types,
            SynthesisLimits {
                max_depth: 8,
                max_types: 1,
            },
        );

        context
            .register(
                &PrimitiveType::Int.into(),
                ClassDescription::datatype("xsd:int", "Int"),
                false,
            )
            .unwrap();
        let result = context.register(
            &PrimitiveType::Long.into(),
            ClassDescription::datatype("xsd:long", "Long"),
            false,
        );

        assert!(matches!(
            result,
            Err(DescriptionError::TypeLimitExceeded { limit: 1 })
        ));
    }

    #[multiplatform_test]
    fn depth_limit() {
        let types = TypeGraph::default();
        let mut context = context(
            &types,
            SynthesisLimits {
                max_depth: 1,
                max_types: 10,
            },
        );
        let typ = TypeRef::named("Person");

        let mut root = context.for_type(&typ);
        let mut child = root.for_type(&typ).unwrap();
        assert_eq!(child.depth(), 1);
        assert!(matches!(
            child.for_type(&typ),
            Err(DescriptionError::DepthLimitExceeded { limit: 1, .. })
        ));
    }

    #[multiplatform_test]
    fn blank_nodes_are_unique() {
        let types = TypeGraph::default();
        let mut context = context(&types, SynthesisLimits::default());

        assert_eq!(context.next_blank_node(), "_:b0");
        assert_eq!(context.next_blank_node(), "_:b1");
    }
}
