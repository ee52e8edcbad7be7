// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reading a single key out of a TOML secrets file.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SecretsError};

/// Read the top-level entry `name` from the TOML document at `path`.
///
/// The value keeps the type it has in the document, so `port = 5432` comes
/// back as an integer, not a string. The file is read on every call.
pub fn read(name: &str, path: &Path) -> Result<toml::Value> {
	debug!(path = %path.display(), "reading secrets file");
	let content = std::fs::read_to_string(path).map_err(|e| SecretsError::Read {
		path: path.to_path_buf(),
		source: e,
	})?;

	let mut table = content
		.parse::<toml::Table>()
		.map_err(|e| SecretsError::Parse {
			path: path.to_path_buf(),
			source: e,
		})?;

	table
		.remove(name)
		.ok_or_else(|| SecretsError::not_defined(path, name))
}
