// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Marker that turns an environment value into a file reference.
pub const DEFAULT_MARKER: char = '@';

/// Settings for a [`SecretResolver`](crate::SecretResolver).
///
/// These can be embedded in an application's own TOML config; missing fields
/// take their defaults:
///
/// ```toml
/// [secrets]
/// marker = "@"
/// base_dir = "/srv/app"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
	/// Leading character marking a file reference.
	pub marker: char,
	/// Directory where the search for relative secrets files starts.
	/// `None` means the current working directory at lookup time.
	pub base_dir: Option<PathBuf>,
}

impl Default for ResolverOptions {
	fn default() -> Self {
		Self {
			marker: DEFAULT_MARKER,
			base_dir: None,
		}
	}
}
