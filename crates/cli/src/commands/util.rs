// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use api_description::ApiDescriptionOrchestrator;
use api_model::{ApiModel, ResolvedApi};
use clap::ArgMatches;
use common::Environment;
use common::config::SynthesisConfig;
use tracing::debug;

use super::command::get;

pub(crate) fn load_model(path: &Path) -> Result<ResolvedApi> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read the model file `{}`", path.display()))?;

    let model = ApiModel::from_json(&content)
        .with_context(|| format!("Could not parse the model file `{}`", path.display()))?;

    debug!(
        types = model.types.len(),
        resources = model.resources.len(),
        "Loaded model from {}",
        path.display()
    );

    model
        .resolve()
        .with_context(|| format!("Invalid model in `{}`", path.display()))
}

pub(crate) fn orchestrator(env: &dyn Environment) -> Result<ApiDescriptionOrchestrator> {
    let config = SynthesisConfig::from_env(env)?;
    Ok(ApiDescriptionOrchestrator::new(config))
}

/// Write to the `output` file if given, else to stdout.
pub(crate) fn write_output(matches: &ArgMatches, content: &str) -> Result<()> {
    match get::<PathBuf>(matches, "output") {
        Some(path) => fs::write(&path, content)
            .with_context(|| format!("Could not write to `{}`", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            Ok(stdout.flush()?)
        }
    }
}
