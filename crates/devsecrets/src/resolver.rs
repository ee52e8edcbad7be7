// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning a secret name into a value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use devsecrets_secret::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{Result, SecretsError};
use crate::options::ResolverOptions;
use crate::{file, locate};

/// What an environment variable points at, before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretRef {
	/// The variable holds the secret itself.
	Literal,
	/// The variable names a secrets file, exactly as written after the
	/// marker. Relative paths have not been searched for yet.
	File(PathBuf),
}

/// Resolves secrets from an environment, following file references.
///
/// An environment value that does not start with the marker is the secret.
/// One that does (`@.secrets.toml`) names a TOML file whose top-level entry
/// under the same name is the secret. Absolute paths are read directly;
/// relative ones are searched for in the base directory and then each of its
/// parents.
///
/// Nothing is cached: every call reads the environment and the file again.
///
/// ```no_run
/// use devsecrets::SecretResolver;
///
/// let resolver = SecretResolver::new().base_dir("/srv/app");
/// let url = resolver.resolve_string("DATABASE_URL")?;
/// let port: u16 = resolver.resolve_as("DATABASE_PORT")?;
/// # Ok::<(), devsecrets::SecretsError>(())
/// ```
#[derive(Clone)]
pub struct SecretResolver {
	options: ResolverOptions,
	env: Arc<dyn EnvSource>,
}

impl SecretResolver {
	/// Resolver over the process environment with default options.
	pub fn new() -> Self {
		Self::with_options(ResolverOptions::default())
	}

	pub fn with_options(options: ResolverOptions) -> Self {
		Self {
			options,
			env: Arc::new(ProcessEnv),
		}
	}

	/// Start relative searches from `dir` instead of the working directory.
	pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.options.base_dir = Some(dir.into());
		self
	}

	pub fn marker(mut self, marker: char) -> Self {
		self.options.marker = marker;
		self
	}

	/// Read variables from `env` instead of the process environment.
	pub fn env_source(mut self, env: impl EnvSource + 'static) -> Self {
		self.env = Arc::new(env);
		self
	}

	pub fn options(&self) -> &ResolverOptions {
		&self.options
	}

	/// Resolve `name` to its value.
	///
	/// Literal environment values come back as [`toml::Value::String`],
	/// unchanged. Values read from a secrets file keep their TOML type.
	pub fn resolve(&self, name: &str) -> Result<toml::Value> {
		let raw = self.lookup(name)?;
		let marker = self.options.marker;

		if !raw.starts_with(marker) {
			debug!(name, source = self.env.name(), "secret given literally");
			return Ok(toml::Value::String(raw));
		}

		let path = self.secrets_path(Path::new(&raw[marker.len_utf8()..]))?;
		debug!(name, path = %path.display(), "reading secret from file");
		file::read(name, &path)
	}

	/// Resolve `name` to a redacted string.
	///
	/// Scalars are converted to their TOML text form (`5432`, `true`);
	/// arrays and tables are rejected.
	pub fn resolve_string(&self, name: &str) -> Result<SecretString> {
		SecretString::from_toml(self.resolve(name)?).map_err(|e| SecretsError::UnexpectedType {
			name: name.to_string(),
			found: e.found,
		})
	}

	/// Resolve `name` and deserialize the value into `T`.
	///
	/// Literal environment values are strings, so only string-like targets
	/// accept them.
	pub fn resolve_as<T>(&self, name: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.resolve(name)?
			.try_into()
			.map_err(|e| SecretsError::Deserialize {
				name: name.to_string(),
				source: e,
			})
	}

	/// Classify the environment value of `name` without reading any file.
	pub fn reference(&self, name: &str) -> Result<SecretRef> {
		let raw = self.lookup(name)?;
		Ok(match raw.strip_prefix(self.options.marker) {
			Some(path) => SecretRef::File(PathBuf::from(path)),
			None => SecretRef::Literal,
		})
	}

	fn lookup(&self, name: &str) -> Result<String> {
		self.env
			.var(name)
			.ok_or_else(|| SecretsError::missing_variable(name))?
			.into_string()
			.map_err(|_| SecretsError::NotUnicode {
				name: name.to_string(),
			})
	}

	fn secrets_path(&self, reference: &Path) -> Result<PathBuf> {
		if reference.is_absolute() {
			return Ok(reference.to_path_buf());
		}
		let start = self.search_root()?;
		locate::locate(reference, &start)
	}

	/// The absolute directory the upward search starts from.
	fn search_root(&self) -> Result<PathBuf> {
		match &self.options.base_dir {
			Some(dir) if dir.is_absolute() => Ok(dir.clone()),
			Some(dir) => Ok(current_dir()?.join(dir)),
			None => current_dir(),
		}
	}
}

fn current_dir() -> Result<PathBuf> {
	std::env::current_dir().map_err(SecretsError::WorkingDirectory)
}

impl Default for SecretResolver {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for SecretResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretResolver")
			.field("options", &self.options)
			.field("env", &self.env.name())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::fs;

	use proptest::prelude::*;
	use tempfile::TempDir;

	use crate::error::SecretErrorKind;

	fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	fn resolver(dir: &Path, pairs: &[(&str, &str)]) -> SecretResolver {
		SecretResolver::new().base_dir(dir).env_source(env(pairs))
	}

	mod literal {
		use super::*;

		#[test]
		fn plain_value_is_returned_verbatim() {
			let dir = TempDir::new().unwrap();
			let r = resolver(dir.path(), &[("Y", "plain-value")]);

			assert_eq!(r.resolve("Y").unwrap(), toml::Value::String("plain-value".into()));
			assert_eq!(r.reference("Y").unwrap(), SecretRef::Literal);
		}

		/// Trailing whitespace and non-ASCII text survive untouched.
		#[test]
		fn whitespace_and_unicode_are_preserved() {
			let dir = TempDir::new().unwrap();
			let raw = "postgresql://user:pw@ídéenna.example.com/fönkýdíbí ";
			let r = resolver(dir.path(), &[("DB", raw)]);

			assert_eq!(r.resolve_string("DB").unwrap().expose(), raw);
		}

		/// A marker anywhere but the first character is just text.
		#[test]
		fn marker_must_be_leading() {
			let dir = TempDir::new().unwrap();
			let r = resolver(dir.path(), &[("EMAIL", "ops@example.com")]);

			assert_eq!(r.resolve_string("EMAIL").unwrap().expose(), "ops@example.com");
		}

		#[test]
		fn missing_variable_is_reported() {
			let dir = TempDir::new().unwrap();
			let r = resolver(dir.path(), &[]);

			let err = r.resolve("not-in-environment").unwrap_err();
			assert_eq!(err.kind(), SecretErrorKind::MissingVariable);
			assert!(err.to_string().contains("variable"));
			assert!(err.to_string().contains("not-in-environment"));
		}
	}

	mod file_reference {
		use super::*;

		#[test]
		fn reads_file_in_base_directory() {
			let dir = TempDir::new().unwrap();
			fs::write(dir.path().join("secrets.toml"), "X = \"hello\"\n").unwrap();
			let r = resolver(dir.path(), &[("X", "@secrets.toml")]);

			assert_eq!(r.resolve("X").unwrap(), toml::Value::String("hello".into()));
			assert_eq!(
				r.reference("X").unwrap(),
				SecretRef::File(PathBuf::from("secrets.toml"))
			);
		}

		#[test]
		fn searches_parent_directories() {
			let dir = TempDir::new().unwrap();
			let deep = dir.path().join("src").join("bin");
			fs::create_dir_all(&deep).unwrap();
			fs::write(dir.path().join(".secrets.toml"), "TOKEN = \"t0k3n\"\n").unwrap();
			let r = resolver(&deep, &[("TOKEN", "@.secrets.toml")]);

			assert_eq!(r.resolve_string("TOKEN").unwrap().expose(), "t0k3n");
		}

		/// Absolute references are read directly, even when a file with the
		/// same name sits in the base directory.
		#[test]
		fn absolute_path_skips_search() {
			let base = TempDir::new().unwrap();
			let elsewhere = TempDir::new().unwrap();
			fs::write(base.path().join("s.toml"), "a = \"near\"\n").unwrap();
			let target = elsewhere.path().join("s.toml");
			fs::write(&target, "a = \"far\"\n").unwrap();
			let reference = format!("@{}", target.display());
			let r = resolver(base.path(), &[("a", reference.as_str())]);

			assert_eq!(r.resolve_string("a").unwrap().expose(), "far");
		}

		#[test]
		fn missing_file_is_not_found() {
			let dir = TempDir::new().unwrap();
			let r = resolver(dir.path(), &[("a", "@.devsecrets-resolver-test-nonexistent")]);

			let err = r.resolve("a").unwrap_err();
			assert_eq!(err.kind(), SecretErrorKind::NotFound);
			assert!(err.to_string().contains("parent"));
		}

		#[test]
		fn custom_marker() {
			let dir = TempDir::new().unwrap();
			fs::write(dir.path().join("s.toml"), "K = \"v\"\n").unwrap();
			let r = resolver(dir.path(), &[("K", "%s.toml"), ("L", "@s.toml")]).marker('%');

			assert_eq!(r.resolve_string("K").unwrap().expose(), "v");
			assert_eq!(r.resolve_string("L").unwrap().expose(), "@s.toml");
		}
	}

	mod typed {
		use super::*;

		fn typed_resolver(dir: &TempDir) -> SecretResolver {
			fs::write(
				dir.path().join("s.toml"),
				"port = 5432\nflags = [1, 2]\nname = \"db\"\n",
			)
			.unwrap();
			resolver(
				dir.path(),
				&[("port", "@s.toml"), ("flags", "@s.toml"), ("name", "@s.toml")],
			)
		}

		#[test]
		fn scalars_become_strings() {
			let dir = TempDir::new().unwrap();
			let r = typed_resolver(&dir);

			assert_eq!(r.resolve_string("port").unwrap().expose(), "5432");
		}

		#[test]
		fn arrays_are_not_strings() {
			let dir = TempDir::new().unwrap();
			let r = typed_resolver(&dir);

			let err = r.resolve_string("flags").unwrap_err();
			assert_eq!(err.kind(), SecretErrorKind::UnexpectedType);
			assert!(err.to_string().contains("array"));
		}

		#[test]
		fn resolve_as_deserializes() {
			let dir = TempDir::new().unwrap();
			let r = typed_resolver(&dir);

			let port: u16 = r.resolve_as("port").unwrap();
			let flags: Vec<u8> = r.resolve_as("flags").unwrap();
			assert_eq!(port, 5432);
			assert_eq!(flags, vec![1, 2]);
		}

		#[test]
		fn resolve_as_reports_type_mismatch() {
			let dir = TempDir::new().unwrap();
			let r = typed_resolver(&dir);

			let err = r.resolve_as::<u16>("name").unwrap_err();
			assert_eq!(err.kind(), SecretErrorKind::Deserialize);
		}
	}

	/// A relative base directory is anchored at the working directory.
	#[test]
	fn relative_base_dir_is_made_absolute() {
		let r = SecretResolver::new().base_dir("config");
		let root = r.search_root().unwrap();

		assert!(root.is_absolute());
		assert!(root.ends_with("config"));
	}

	#[test]
	fn debug_does_not_print_environment() {
		let r = SecretResolver::new().env_source(env(&[("TOKEN", "hunter2")]));
		let out = format!("{r:?}");

		assert!(out.contains("map"));
		assert!(!out.contains("hunter2"));
	}

	proptest! {
		/// Any value without the leading marker round-trips unchanged.
		#[test]
		fn literal_values_pass_through(value in "[^@].*") {
			let r = SecretResolver::new()
				.base_dir("/")
				.env_source(env(&[("V", value.as_str())]));
			prop_assert_eq!(r.resolve("V").unwrap(), toml::Value::String(value.clone()));
		}
	}
}
