// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting holder for resolved secret values.
//!
//! A [`Secret<T>`] never prints its contents: `Debug` and `Display` both
//! write [`REDACTED`], so a secret can sit in a config struct or a
//! `tracing` field without leaking. The value is zeroized on drop and is
//! read through [`Secret::expose`].
//!
//! [`SecretString::from_toml`] turns a scalar read from a secrets file into
//! its text form without the value ever passing through an unwrapped
//! `String` the caller owns.
//!
//! ```
//! use devsecrets_secret::SecretString;
//!
//! let port = SecretString::from_toml(toml::Value::Integer(5432)).unwrap();
//!
//! assert_eq!(format!("{port}"), "[REDACTED]");
//! assert_eq!(port.expose(), "5432");
//! ```

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

/// Placeholder printed in place of a secret.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value that never formats its contents.
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// A secret in text form: a password, token, or connection string.
pub type SecretString = Secret<String>;

/// A TOML array or table was given where a single value was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a scalar value, found a {found}")]
pub struct NotScalar {
	/// TOML type name, e.g. `"array"`.
	pub found: &'static str,
}

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// Text form of a scalar TOML value.
	///
	/// Strings are taken as-is; integers, floats, booleans and datetimes use
	/// their TOML spelling (`5432`, `true`). Arrays and tables are rejected.
	pub fn from_toml(value: toml::Value) -> Result<Self, NotScalar> {
		let text = match value {
			toml::Value::String(s) => s,
			toml::Value::Integer(i) => i.to_string(),
			toml::Value::Float(f) => f.to_string(),
			toml::Value::Boolean(b) => b.to_string(),
			toml::Value::Datetime(d) => d.to_string(),
			other => {
				return Err(NotScalar {
					found: other.type_str(),
				})
			}
		};
		Ok(Self::new(text))
	}
}

impl<T> Drop for Secret<T>
where
	T: Zeroize,
{
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secret({REDACTED:?})")
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
