// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use api_model::Verb;
use clap::{Arg, ArgMatches, Command};
use colored::Colorize;
use common::Environment;

use super::command::{CommandDefinition, get_required, model_file_arg, output_arg};
use super::util::{load_model, orchestrator, write_output};

pub(crate) struct MatchCommandDefinition {}

impl CommandDefinition for MatchCommandDefinition {
    fn command(&self) -> Command {
        Command::new("match")
            .about("Find the operation serving a request, and the arguments bound from it")
            .arg(model_file_arg())
            .arg(
                Arg::new("verb")
                    .help("The HTTP method of the request")
                    .required(true)
                    .index(2),
            )
            .arg(
                Arg::new("path")
                    .help("The path and query of the request (`/people?page=2`)")
                    .required(true)
                    .index(3),
            )
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let model_path: PathBuf = get_required(matches, "model")?;
        let verb: String = get_required(matches, "verb")?;
        let path: String = get_required(matches, "path")?;

        let verb = Verb::parse(&verb).ok_or_else(|| anyhow!("Unknown HTTP method `{verb}`"))?;

        let api = load_model(&model_path)?;
        let routes = orchestrator(env)?.route_table(&api)?;

        let found = routes
            .find(verb, &path)
            .ok_or_else(|| anyhow!("No operation serves {verb} {path}"))?;

        let mut output = String::new();
        writeln!(
            output,
            "{} {}",
            found.operation.id.green().bold(),
            found.operation.template
        )?;
        for (name, value) in found.bindings.path.iter() {
            writeln!(output, "  {} {name} = {value}", "path ".dimmed())?;
        }
        for (name, value) in found.bindings.query.iter() {
            writeln!(output, "  {} {name} = {value}", "query".dimmed())?;
        }

        write_output(matches, &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MapEnvironment;
    use std::fs;

    const MODEL: &str = r#"{
        "title": "People",
        "base_uri": "http://example.com/api/",
        "types": [{"name": "Person", "members": [{"name": "id", "type": "Int", "key": true}]}],
        "resources": [{
            "type": "Person",
            "operations": [
                {"name": "list", "results": [{"type": "[Person]"}]},
                {"name": "getById", "parameters": [{"name": "id", "type": "Int"}], "results": [{"type": "Person"}]}
            ]
        }]
    }"#;

    fn run(dir: &tempfile::TempDir, verb: &str, path: &str) -> Result<String> {
        colored::control::set_override(false);

        let model = dir.path().join("people.json");
        let output = dir.path().join("match.txt");
        fs::write(&model, MODEL)?;

        let definition = MatchCommandDefinition {};
        let matches = definition.command().try_get_matches_from([
            "match",
            model.to_str().unwrap(),
            verb,
            path,
            "-o",
            output.to_str().unwrap(),
        ])?;
        definition.execute(&matches, &MapEnvironment::new())?;

        Ok(fs::read_to_string(&output)?)
    }

    #[test]
    fn prints_bindings() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(&dir, "get", "/api/people/42").unwrap();
        assert_eq!(
            output,
            "Person.getById /api/people/{id}\n  path  id = 42\n"
        );

        let output = run(&dir, "GET", "/api/people?itemsPerPage=5").unwrap();
        assert_eq!(
            output,
            "Person.list /api/people{?page,itemsPerPage}\n  query itemsPerPage = 5\n"
        );
    }

    #[test]
    fn unmatched_requests() {
        let dir = tempfile::tempdir().unwrap();

        assert!(run(&dir, "DELETE", "/api/people/42").is_err());
        assert!(run(&dir, "GET", "/people/42").is_err());
        assert!(run(&dir, "FETCH", "/api/people/42").is_err());
    }
}
