// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::Result;
use api_description::{EntryPointAggregator, to_json_ld};
use clap::{ArgMatches, Command};
use common::Environment;

use super::command::{CommandDefinition, get_required, model_file_arg, output_arg, profile_arg};
use super::util::{load_model, orchestrator, write_output};

pub(crate) struct DocCommandDefinition {}

impl CommandDefinition for DocCommandDefinition {
    fn command(&self) -> Command {
        Command::new("doc")
            .about("Produce the JSON-LD documentation of an API")
            .arg(model_file_arg())
            .arg(profile_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches, env: &dyn Environment) -> Result<()> {
        let model_path: PathBuf = get_required(matches, "model")?;
        let profiles: Vec<String> = matches
            .get_many::<String>("profile")
            .map(|profiles| profiles.cloned().collect())
            .unwrap_or_default();

        let api = load_model(&model_path)?;
        let orchestrator = orchestrator(env)?;

        let documentation = EntryPointAggregator::new(&orchestrator).describe(&api, &profiles)?;
        let document = serde_json::to_string_pretty(&to_json_ld(&documentation))?;

        write_output(matches, &format!("{document}\n"))
    }
}
