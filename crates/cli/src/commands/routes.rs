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

use anyhow::Result;
use clap::{ArgMatches, Command};
use colored::Colorize;
use common::Environment;

use super::command::{CommandDefinition, get_required, model_file_arg, output_arg};
use super::util::{load_model, orchestrator, write_output};

pub(crate) struct RoutesCommandDefinition {}

impl CommandDefinition for RoutesCommandDefinition {
    fn command(&self) -> Command {
        Command::new("routes")
            .about("List the routes synthesized for an API")
            .arg(model_file_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let model_path: PathBuf = get_required(matches, "model")?;

        let api = load_model(&model_path)?;
        let routes = orchestrator(env)?.route_table(&api)?;

        let mut output = String::new();
        for operation in routes.iter() {
            writeln!(
                output,
                "{:<8}{:<48}{}",
                operation.verb.as_str().green().bold(),
                operation.template,
                operation.id.dimmed()
            )?;
        }

        write_output(matches, &output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MapEnvironment;
    use std::fs;

    #[test]
    fn lists_every_route() {
        colored::control::set_override(false);

        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("people.json");
        let output = dir.path().join("routes.txt");
        fs::write(
            &model,
            r#"{
                "title": "People",
                "types": [{"name": "Person", "members": [{"name": "id", "type": "Int", "key": true}]}],
                "resources": [{
                    "type": "Person",
                    "operations": [
                        {"name": "list", "results": [{"type": "[Person]"}]},
                        {"name": "getById", "parameters": [{"name": "id", "type": "Int"}], "results": [{"type": "Person"}]},
                        {"name": "removeById", "parameters": [{"name": "id", "type": "Int"}]}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let definition = RoutesCommandDefinition {};
        let matches = definition
            .command()
            .try_get_matches_from([
                "routes",
                model.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
            ])
            .unwrap();
        definition.execute(&matches, &MapEnvironment::new()).unwrap();

        let lines: Vec<Vec<String>> = fs::read_to_string(&output)
            .unwrap()
            .lines()
            .map(|line| line.split_whitespace().map(str::to_string).collect())
            .collect();

        assert_eq!(
            lines,
            vec![
                vec!["GET", "/people{?page,itemsPerPage}", "Person.list"],
                vec!["GET", "/people/{id}", "Person.getById"],
                vec!["DELETE", "/people/{id}", "Person.removeById"],
            ]
        );
    }
}
