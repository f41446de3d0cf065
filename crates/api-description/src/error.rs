// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_model::ModelError;
use route_synthesis::RouteError;
use thiserror::Error;
use type_description::DescriptionError;

#[derive(Error, Debug)]
pub enum ApiDescriptionError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("No resource exposes type `{0}`")]
    UnknownResource(String),

    #[error("Invalid content range `{0}`")]
    InvalidContentRange(String),
}
