// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where environment variables come from.
//!
//! The resolver reads the process environment by default. Embedding code and
//! tests can hand it any other [`EnvSource`], such as a plain map.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;

/// A read-only view of environment variables.
pub trait EnvSource: Send + Sync {
	/// Name for logging.
	fn name(&self) -> &'static str;

	/// Look up a single variable. `None` means unset.
	fn var(&self, key: &str) -> Option<OsString>;
}

/// The environment of the current process, read fresh on every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn name(&self) -> &'static str {
		"process"
	}

	fn var(&self, key: &str) -> Option<OsString> {
		// var_os may panic on these.
		if key.is_empty() || key.contains(['=', '\0']) {
			return None;
		}
		std::env::var_os(key)
	}
}

impl EnvSource for HashMap<String, String> {
	fn name(&self) -> &'static str {
		"map"
	}

	fn var(&self, key: &str) -> Option<OsString> {
		self.get(key).map(OsString::from)
	}
}

impl EnvSource for BTreeMap<String, String> {
	fn name(&self) -> &'static str {
		"map"
	}

	fn var(&self, key: &str) -> Option<OsString> {
		self.get(key).map(OsString::from)
	}
}
