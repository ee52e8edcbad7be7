// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upward search for secrets files.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, SecretsError};

/// Find `filename` in `start` or the closest directory above it.
///
/// Each directory is probed with a plain existence check, nearest first. The
/// walk ends at the filesystem root, i.e. the first directory without a
/// parent (`/` on Unix, a drive or share root on Windows).
pub fn locate(filename: &Path, start: &Path) -> Result<PathBuf> {
	for directory in ancestors_of(start) {
		let candidate = directory.join(filename);
		trace!(candidate = %candidate.display(), "probing for secrets file");
		if candidate.exists() {
			debug!(path = %candidate.display(), "found secrets file");
			return Ok(candidate);
		}
	}

	Err(SecretsError::NotFound {
		filename: filename.to_path_buf(),
		directory: start.to_path_buf(),
	})
}

/// The directories [`locate`] would probe, in search order.
pub fn ancestors_of(start: &Path) -> impl Iterator<Item = &Path> {
	start.ancestors()
}
