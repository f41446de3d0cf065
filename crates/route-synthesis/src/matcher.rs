// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::cache::RouteCache;
use crate::error::RouteError;

lazy_static! {
    static ref VARIABLE_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

const QUERY_VALUE: &str = "[^&#]*";

/// Accepts the requests an operation serves.
///
/// The path is matched by a regular expression with one named capture per path variable. The
/// query string is matched by an alternation of the operation's query variable names, accepting
/// them in any order; when all of them are optional, the query string itself is optional.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    regex: Arc<Regex>,
    path_variables: Vec<String>,
    required_query_variables: Vec<String>,
}

/// Arguments captured from a matched request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteBindings {
    pub path: IndexMap<String, String>,
    /// Decoded query values (the last one wins for repeated names)
    pub query: IndexMap<String, String>,
}

impl RouteBindings {
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.path
            .get(variable)
            .or_else(|| self.query.get(variable))
            .map(String::as_str)
    }
}

impl RouteMatcher {
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path_and_query: &str) -> bool {
        self.bindings(path_and_query).is_some()
    }

    pub fn bindings(&self, path_and_query: &str) -> Option<RouteBindings> {
        let captures = self.regex.captures(path_and_query)?;

        let path = self
            .path_variables
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.clone(), value.as_str().to_string()))
            })
            .collect();

        let query: IndexMap<String, String> = match path_and_query.split_once('?') {
            Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
            None => IndexMap::new(),
        };

        let missing_required = self
            .required_query_variables
            .iter()
            .any(|name| !query.contains_key(name));

        (!missing_required).then_some(RouteBindings { path, query })
    }
}

/// Builds a matcher and its display template side by side, so that both list the same
/// variables in the same order with the same optional groups.
pub(crate) struct RoutePattern<'o> {
    operation: &'o str,
    regex: String,
    template: String,
    path_variables: Vec<String>,
    query_variables: Vec<(String, bool)>,
}

impl<'o> RoutePattern<'o> {
    pub fn new(operation: &'o str) -> Self {
        Self {
            operation,
            regex: String::new(),
            template: String::new(),
            path_variables: vec![],
            query_variables: vec![],
        }
    }

    /// Append literal path segments (`/people/active`).
    pub fn literal(&mut self, path: &str) {
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            self.regex.push('/');
            self.regex.push_str(&regex::escape(segment));
            self.template.push('/');
            self.template.push_str(segment);
        }
    }

    /// Append a path segment capturing `name`, whose values match `value_pattern`.
    pub fn path_variable(&mut self, name: &str, value_pattern: &str) -> Result<(), RouteError> {
        self.check_variable(name)?;

        self.regex.push_str(&format!("/(?P<{name}>{value_pattern})"));
        self.template.push_str(&format!("/{{{name}}}"));
        self.path_variables.push(name.to_string());
        Ok(())
    }

    pub fn query_variable(&mut self, name: &str, required: bool) -> Result<(), RouteError> {
        self.check_variable(name)?;
        self.query_variables.push((name.to_string(), required));
        Ok(())
    }

    /// The display template and compiled matcher.
    pub fn finish(mut self, cache: &RouteCache) -> Result<(String, RouteMatcher), RouteError> {
        if self.regex.is_empty() {
            self.regex.push('/');
            self.template.push('/');
        }

        if !self.query_variables.is_empty() {
            let names: Vec<&str> = self
                .query_variables
                .iter()
                .map(|(name, _)| name.as_str())
                .collect();

            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            let pair = format!("(?:{alternation})(?:={QUERY_VALUE})?");
            let query = format!(r"\?{pair}(?:&{pair})*");

            if self.query_variables.iter().any(|(_, required)| *required) {
                self.regex.push_str(&query);
            } else {
                self.regex.push_str(&format!(r"(?:{query}|\?)?"));
            }

            self.template.push_str(&format!("{{?{}}}", names.join(",")));
        }

        let regex = cache.regex(&format!("^{}$", self.regex))?;

        let required_query_variables = self
            .query_variables
            .into_iter()
            .filter_map(|(name, required)| required.then_some(name))
            .collect();

        Ok((
            self.template,
            RouteMatcher {
                regex,
                path_variables: self.path_variables,
                required_query_variables,
            },
        ))
    }

    fn check_variable(&self, name: &str) -> Result<(), RouteError> {
        let duplicate = self.path_variables.iter().any(|v| v == name)
            || self.query_variables.iter().any(|(v, _)| v == name);

        if VARIABLE_NAME.is_match(name) && !duplicate {
            Ok(())
        } else {
            Err(RouteError::InvalidVariable {
                operation: self.operation.to_string(),
                variable: name.to_string(),
            })
        }
    }
}
