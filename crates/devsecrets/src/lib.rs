// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read secrets from environment variables or TOML files.
//!
//! A secret is looked up by name in the environment. If the value starts
//! with `@`, the rest of it is a path to a TOML file and the secret is the
//! entry with the same name in that file:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/dev        # literal
//! DATABASE_URL=@.secrets.toml                  # look in .secrets.toml
//! DATABASE_URL=@/run/secrets/app.toml          # absolute, no search
//! ```
//!
//! Relative paths are searched for in a base directory and then each of its
//! parents, so a single `.secrets.toml` at the root of a checkout serves
//! every crate and binary below it.
//!
//! - [`resolve`] / [`resolve_from`]: one-shot lookups against the process
//!   environment
//! - [`SecretResolver`]: configurable resolver (base directory, marker,
//!   environment source)
//! - [`SecretsError`]: the single error type, with [`SecretsError::kind`]
//!   for matching on the cause

pub mod env;
pub mod error;
pub mod file;
pub mod locate;
pub mod options;
pub mod resolver;

use std::path::Path;

pub use devsecrets_secret::{NotScalar, Secret, SecretString, REDACTED};
pub use env::{EnvSource, ProcessEnv};
pub use error::{SecretErrorKind, SecretsError};
pub use options::{ResolverOptions, DEFAULT_MARKER};
pub use resolver::{SecretRef, SecretResolver};

/// Resolve `name` from the process environment.
///
/// Relative secrets files are searched for starting at the current working
/// directory.
///
/// ```no_run
/// let token = devsecrets::resolve("GITHUB_TOKEN")?;
/// # Ok::<(), devsecrets::SecretsError>(())
/// ```
pub fn resolve(name: &str) -> Result<toml::Value, SecretsError> {
	SecretResolver::new().resolve(name)
}

/// Resolve `name` from the process environment, searching for relative
/// secrets files starting at `base_dir`.
///
/// Passing `env!("CARGO_MANIFEST_DIR")` anchors the search at the calling
/// crate, wherever the binary is run from.
pub fn resolve_from(name: &str, base_dir: impl AsRef<Path>) -> Result<toml::Value, SecretsError> {
	SecretResolver::new()
		.base_dir(base_dir.as_ref())
		.resolve(name)
}
