// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::Verb;
use heck::ToKebabCase;

/// Leading words of a method name that imply its verb.
const VERB_PREFIXES: &[(&str, Verb)] = &[
    ("get", Verb::Get),
    ("list", Verb::Get),
    ("all", Verb::Get),
    ("find", Verb::Get),
    ("query", Verb::Get),
    ("search", Verb::Get),
    ("fetch", Verb::Get),
    ("calculate", Verb::Get),
    ("read", Verb::Get),
    ("create", Verb::Post),
    ("add", Verb::Post),
    ("post", Verb::Post),
    ("insert", Verb::Post),
    ("update", Verb::Put),
    ("set", Verb::Put),
    ("put", Verb::Put),
    ("replace", Verb::Put),
    ("modify", Verb::Put),
    ("patch", Verb::Patch),
    ("delete", Verb::Delete),
    ("remove", Verb::Delete),
    ("destroy", Verb::Delete),
    ("head", Verb::Head),
    ("options", Verb::Options),
];

/// Verb and route segment inferred from a method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredRoute {
    pub verb: Verb,
    /// Route segment relative to the resource prefix (`None` to address the resource itself)
    pub segment: Option<String>,
}

/// Infer the verb and route segment of a method from its name.
///
/// - `listActive` -> `GET active`
/// - `getById` -> `GET` on the resource itself
/// - `createDraftOrder` -> `POST draft-order`
/// - `summary` (no known prefix) -> `GET summary`
pub fn infer_route(method_name: &str) -> InferredRoute {
    let prefix = VERB_PREFIXES
        .iter()
        .filter(|(prefix, _)| strip_word_prefix(method_name, prefix).is_some())
        .max_by_key(|(prefix, _)| prefix.len());

    match prefix {
        Some((prefix, verb)) => {
            let remainder = strip_word_prefix(method_name, prefix).unwrap_or_default();
            InferredRoute {
                verb: *verb,
                segment: remainder_segment(remainder),
            }
        }
        None => InferredRoute {
            verb: Verb::Get,
            segment: Some(method_name.to_lowercase()).filter(|s| !s.is_empty()),
        },
    }
}

/// Strip `prefix` (case-insensitively) when it forms a whole word of `name`.
fn strip_word_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let remainder = &name[prefix.len()..];
    match remainder.chars().next() {
        None => Some(remainder),
        Some(c) if c.is_uppercase() || c.is_ascii_digit() || c == '_' => Some(remainder),
        _ => None,
    }
}

fn remainder_segment(remainder: &str) -> Option<String> {
    let remainder = remainder.trim_start_matches('_');

    // `ById`, `ByName`: the selector is carried by the parameters
    let selector = remainder
        .strip_prefix("By")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase());

    if remainder.is_empty() || selector {
        None
    } else {
        Some(remainder.to_kebab_case())
    }
}

/// The route prefix of a resource exposing `type_name`: its kebab-cased plural.
pub fn resource_segment(type_name: &str) -> String {
    let plural = pluralizer::pluralize(type_name, 2, false);
    let plural = if plural == type_name {
        format!("{type_name}s")
    } else {
        plural
    };
    plural.to_kebab_case()
}

/// Join path fragments with single slashes, always starting with one.
pub fn join_path<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let path: String = fragments
        .into_iter()
        .flat_map(|fragment| fragment.split('/'))
        .filter(|part| !part.is_empty())
        .map(|part| format!("/{part}"))
        .collect();

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    fn route(verb: Verb, segment: Option<&str>) -> InferredRoute {
        InferredRoute {
            verb,
            segment: segment.map(str::to_string),
        }
    }

    #[multiplatform_test]
    fn verb_prefixes() {
        assert_eq!(infer_route("listActive"), route(Verb::Get, Some("active")));
        assert_eq!(infer_route("list"), route(Verb::Get, None));
        assert_eq!(infer_route("getById"), route(Verb::Get, None));
        assert_eq!(infer_route("findByEmailAddress"), route(Verb::Get, None));
        assert_eq!(
            infer_route("createDraftOrder"),
            route(Verb::Post, Some("draft-order"))
        );
        assert_eq!(infer_route("UpdateEmail"), route(Verb::Put, Some("email")));
        assert_eq!(infer_route("patch"), route(Verb::Patch, None));
        assert_eq!(infer_route("removeFriend"), route(Verb::Delete, Some("friend")));
        assert_eq!(infer_route("headCount"), route(Verb::Head, Some("count")));
        assert_eq!(infer_route("options"), route(Verb::Options, None));
        assert_eq!(infer_route("get_total"), route(Verb::Get, Some("total")));
    }

    #[multiplatform_test]
    fn prefixes_must_be_whole_words() {
        // `settle` starts with `set`, `address` with `add`
        assert_eq!(infer_route("settle"), route(Verb::Get, Some("settle")));
        assert_eq!(
            infer_route("addressBook"),
            route(Verb::Get, Some("addressbook"))
        );
        assert_eq!(infer_route("allCaps"), route(Verb::Get, Some("caps")));
        assert_eq!(infer_route("replaceAll"), route(Verb::Put, Some("all")));
    }

    #[multiplatform_test]
    fn unknown_prefix_defaults_to_get() {
        assert_eq!(infer_route("Summary"), route(Verb::Get, Some("summary")));
        assert_eq!(infer_route("byName"), route(Verb::Get, Some("byname")));
    }

    #[multiplatform_test]
    fn resource_segments() {
        assert_eq!(resource_segment("Person"), "people");
        assert_eq!(resource_segment("Concert"), "concerts");
        assert_eq!(resource_segment("ConcertArtist"), "concert-artists");
    }

    #[multiplatform_test]
    fn joined_paths() {
        assert_eq!(join_path(["/api/", "people"]), "/api/people");
        assert_eq!(join_path(["/", ""]), "/");
        assert_eq!(join_path(["/api", "/people/", "active"]), "/api/people/active");
    }
}
