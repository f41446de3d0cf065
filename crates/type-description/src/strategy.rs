// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::cmp::Reverse;
use std::collections::HashSet;

use api_model::TypeRef;

use crate::builder::HydraTypeDescriptionBuilder;
use crate::class::{ClassDescription, ClassId};
use crate::context::{DescriptionContext, TypeScope};
use crate::error::DescriptionError;

/// A way of turning types into classes, serving one or more documentation profiles.
pub trait TypeDescriptionStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Profile IRIs this strategy produces documentation for.
    fn profiles(&self) -> &[&str];

    /// Describe the scope's current type. Implementations must register what they build in the
    /// scope's context so that the same type is never described twice.
    fn describe(&self, scope: &mut TypeScope<'_, '_>) -> Result<ClassId, DescriptionError>;

    /// Specialize an already described class for one call site (an operation's expected or
    /// returned value). The new class is a blank node whose only statement is the subclass edge,
    /// plus the single-value flag of the call site.
    fn sub_class(
        &self,
        context: &mut DescriptionContext<'_>,
        base: ClassId,
        call_site: &TypeRef,
    ) -> ClassId {
        let id = context.next_blank_node();
        context.add_class(ClassDescription::subclass(id, base, !call_site.is_list()))
    }
}

/// Strategies in registration order.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn TypeDescriptionStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self { strategies: vec![] }
    }

    pub fn register(&mut self, strategy: Box<dyn TypeDescriptionStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn with_strategy(mut self, strategy: Box<dyn TypeDescriptionStrategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Pick the strategy sharing the most profiles with `requested`.
    ///
    /// Ties go to the strategy registered first. With nothing requested, the first registered
    /// strategy is used. A request no strategy overlaps with is a configuration error.
    pub fn select(
        &self,
        requested: &[String],
    ) -> Result<&dyn TypeDescriptionStrategy, DescriptionError> {
        let first = self.strategies.first().ok_or(DescriptionError::NoStrategies)?;

        if requested.is_empty() {
            return Ok(first.as_ref());
        }

        let wanted: HashSet<&str> = requested.iter().map(|p| normalize(p)).collect();

        let (score, strategy) = self
            .strategies
            .iter()
            .enumerate()
            .map(|(index, strategy)| {
                let score = strategy
                    .profiles()
                    .iter()
                    .map(|p| normalize(p))
                    .collect::<HashSet<_>>()
                    .intersection(&wanted)
                    .count();
                (score, index, strategy)
            })
            .max_by_key(|(score, index, _)| (*score, Reverse(*index)))
            .map(|(score, _, strategy)| (score, strategy))
            .ok_or(DescriptionError::NoStrategies)?;

        if score == 0 {
            return Err(DescriptionError::NoMatchingStrategy {
                requested: requested.to_vec(),
            });
        }

        tracing::debug!(
            "Selected description strategy `{}` (score {score})",
            strategy.name()
        );
        Ok(strategy.as_ref())
    }
}

impl Default for StrategyRegistry {
    /// A registry with the Hydra strategy.
    fn default() -> Self {
        Self::new().with_strategy(Box::new(HydraTypeDescriptionBuilder))
    }
}

fn normalize(profile: &str) -> &str {
    profile.trim().trim_end_matches(['#', '/'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::HYDRA_PROFILE;
    use multiplatform_test::multiplatform_test;

    struct Fixed {
        name: &'static str,
        profiles: &'static [&'static str],
    }

    impl TypeDescriptionStrategy for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn profiles(&self) -> &[&str] {
            self.profiles
        }

        fn describe(&self, scope: &mut TypeScope<'_, '_>) -> Result<ClassId, DescriptionError> {
            let typ = scope.current_type().clone();
            scope.register(&typ, ClassDescription::class(self.name, self.name), false)
        }
    }

    fn registry() -> StrategyRegistry {
        StrategyRegistry::new()
            .with_strategy(Box::new(Fixed {
                name: "a",
                profiles: &["urn:p1", "urn:p2"],
            }))
            .with_strategy(Box::new(Fixed {
                name: "b",
                profiles: &["urn:p2", "urn:p3", "urn:p4"],
            }))
            .with_strategy(Box::new(Fixed {
                name: "c",
                profiles: &["urn:p1", "urn:p2"],
            }))
    }

    fn requested(profiles: &[&str]) -> Vec<String> {
        profiles.iter().map(|p| p.to_string()).collect()
    }

    #[multiplatform_test]
    fn highest_overlap_wins() {
        let registry = registry();
        let selected = registry.select(&requested(&["urn:p3", "urn:p4"])).unwrap();
        assert_eq!(selected.name(), "b");
    }

    #[multiplatform_test]
    fn ties_go_to_first_registered() {
        let registry = registry();
        assert_eq!(registry.select(&requested(&["urn:p1"])).unwrap().name(), "a");
        assert_eq!(registry.select(&requested(&["urn:p2"])).unwrap().name(), "a");
    }

    #[multiplatform_test]
    fn unspecified_profile_uses_first() {
        assert_eq!(registry().select(&[]).unwrap().name(), "a");
    }

    #[multiplatform_test]
    fn unsupported_profile_is_an_error() {
        assert!(matches!(
            registry().select(&requested(&["urn:other"])),
            Err(DescriptionError::NoMatchingStrategy { .. })
        ));
        assert!(matches!(
            StrategyRegistry::new().select(&[]),
            Err(DescriptionError::NoStrategies)
        ));
    }

    #[multiplatform_test]
    fn default_registry_serves_hydra() {
        let registry = StrategyRegistry::default();
        let profile = format!("{HYDRA_PROFILE}#");
        let selected = registry.select(&requested(&[profile.as_str()])).unwrap();
        assert_eq!(selected.name(), "hydra");
    }
}
