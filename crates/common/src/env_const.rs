// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub const HYDRO_LOG: &str = "HYDRO_LOG";

pub const HYDRO_BASE_URI: &str = "HYDRO_BASE_URI";
pub const HYDRO_PROFILES: &str = "HYDRO_PROFILES";

pub const HYDRO_MAX_TYPE_DEPTH: &str = "HYDRO_MAX_TYPE_DEPTH";
pub const HYDRO_MAX_DESCRIBED_TYPES: &str = "HYDRO_MAX_DESCRIBED_TYPES";

pub const HYDRO_LINKED_DATA_MEDIA_TYPES: &str = "HYDRO_LINKED_DATA_MEDIA_TYPES";
pub const HYDRO_PLAIN_MEDIA_TYPES: &str = "HYDRO_PLAIN_MEDIA_TYPES";
