// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ApiDescriptionError;

/// The `Content-Range` of a page of a collection: `start-end/total`, with `*` for an unknown
/// total. Bounds are inclusive item offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub start: u64,
    pub end: u64,
    pub total: Option<u64>,
}

impl ContentRange {
    /// The range of a (1-based) page, or `None` when the page lies past the end of the
    /// collection.
    pub fn for_page(page: u64, items_per_page: u64, total: Option<u64>) -> Option<Self> {
        if page == 0 || items_per_page == 0 {
            return None;
        }

        let start = (page - 1).checked_mul(items_per_page)?;
        let mut end = start.checked_add(items_per_page - 1)?;

        if let Some(total) = total {
            if start >= total {
                return None;
            }
            end = end.min(total - 1);
        }

        Some(Self { start, end, total })
    }

    pub fn item_count(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_last(&self) -> bool {
        self.total.is_some_and(|total| self.end + 1 >= total)
    }
}

impl Display for ContentRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.total {
            Some(total) => write!(f, "{}-{}/{total}", self.start, self.end),
            None => write!(f, "{}-{}/*", self.start, self.end),
        }
    }
}

impl FromStr for ContentRange {
    type Err = ApiDescriptionError;

    /// Accepts an optional unit (`items 0-9/100`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiDescriptionError::InvalidContentRange(value.to_string());

        let trimmed = value.trim();
        let range = match trimmed.split_once(' ') {
            Some((_, range)) => range.trim(),
            None => trimmed,
        };

        let (bounds, total) = range.split_once('/').ok_or_else(invalid)?;
        let (start, end) = bounds.split_once('-').ok_or_else(invalid)?;

        let start: u64 = start.trim().parse().map_err(|_| invalid())?;
        let end: u64 = end.trim().parse().map_err(|_| invalid())?;
        let total = match total.trim() {
            "*" => None,
            total => Some(total.parse::<u64>().map_err(|_| invalid())?),
        };

        if end < start || total.is_some_and(|total| end >= total) {
            return Err(invalid());
        }

        Ok(Self { start, end, total })
    }
}
