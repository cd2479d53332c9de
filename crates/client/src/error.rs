//! Error types for remote calls and settings.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of a call issued to the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
	/// The call did not complete within the transport timeout.
	#[error("{call}: timeout of {}ms exceeded", timeout.as_millis())]
	Timeout {
		/// Remote procedure name.
		call: &'static str,
		/// Timeout that elapsed.
		timeout: Duration,
	},

	/// The simulator answered with an error.
	#[error("simulator error: {0}")]
	Remote(String),

	/// The connection failed before an answer arrived.
	#[error("transport error: {0}")]
	Transport(String),

	/// The episode backing a proxy no longer exists.
	#[error("trying to operate on a destroyed episode")]
	EpisodeLost,
}

impl RpcError {
	/// Returns true for the timeout class.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

/// Errors that can occur when loading [`crate::ClientSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Error parsing TOML.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a settings file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The transport timeout must be non-zero.
	#[error("timeout_ms must be greater than zero")]
	ZeroTimeout,
}
