// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error type shared by every resolution step.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while resolving a secret.
///
/// Callers that only care about the cause can match on [`SecretsError::kind`]
/// instead of destructuring the variants.
#[derive(Debug, Error)]
pub enum SecretsError {
	/// The named environment variable is not set.
	#[error("missing environment variable {name}")]
	MissingVariable { name: String },

	/// The environment variable is set but is not valid unicode.
	#[error("environment variable {name} is not valid unicode")]
	NotUnicode { name: String },

	/// The current working directory could not be determined while a
	/// relative secrets file needed a base directory.
	#[error("cannot determine the working directory to search for secrets files: {0}")]
	WorkingDirectory(#[source] std::io::Error),

	/// A relative secrets file was not found in the base directory or any
	/// directory above it.
	#[error("no file named {filename} found in {directory} or any of its parents")]
	NotFound {
		filename: PathBuf,
		directory: PathBuf,
	},

	/// The secrets file was located but could not be read.
	#[error("failed to read secrets file {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The secrets file is not a valid TOML document.
	#[error("secrets file {path} cannot be parsed as TOML: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// The secrets file parsed but has no top-level key with this name.
	#[error("secrets file {path} does not define {name}")]
	NotDefined { path: PathBuf, name: String },

	/// A string was requested but the file holds an array or table.
	#[error("secret {name} is a {found}, expected a scalar value")]
	UnexpectedType { name: String, found: &'static str },

	/// The value could not be converted into the requested type.
	#[error("secret {name} could not be deserialized: {source}")]
	Deserialize {
		name: String,
		#[source]
		source: toml::de::Error,
	},
}

/// Flat classification of [`SecretsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretErrorKind {
	MissingVariable,
	NotUnicode,
	WorkingDirectory,
	NotFound,
	Read,
	ParseError,
	NotDefined,
	UnexpectedType,
	Deserialize,
}

impl SecretsError {
	pub fn kind(&self) -> SecretErrorKind {
		match self {
			Self::MissingVariable { .. } => SecretErrorKind::MissingVariable,
			Self::NotUnicode { .. } => SecretErrorKind::NotUnicode,
			Self::WorkingDirectory(_) => SecretErrorKind::WorkingDirectory,
			Self::NotFound { .. } => SecretErrorKind::NotFound,
			Self::Read { .. } => SecretErrorKind::Read,
			Self::Parse { .. } => SecretErrorKind::ParseError,
			Self::NotDefined { .. } => SecretErrorKind::NotDefined,
			Self::UnexpectedType { .. } => SecretErrorKind::UnexpectedType,
			Self::Deserialize { .. } => SecretErrorKind::Deserialize,
		}
	}

	pub(crate) fn missing_variable(name: impl Into<String>) -> Self {
		Self::MissingVariable { name: name.into() }
	}

	pub(crate) fn not_defined(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
		Self::NotDefined {
			path: path.into(),
			name: name.into(),
		}
	}
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = SecretsError> = std::result::Result<T, E>;
