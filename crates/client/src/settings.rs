//! Client settings loaded from TOML.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SettingsError;
use crate::gc::GarbageCollectionPolicy;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Settings shared by every actor created through one [`crate::Episode`].
///
/// ```toml
/// timeout_ms = 2000
/// garbage_collection = "disabled"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
	/// Transport timeout for one remote call, in milliseconds.
	pub timeout_ms: u64,
	/// Policy attached to actors built by [`crate::Episode::make_actor`].
	pub garbage_collection: GarbageCollectionPolicy,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			timeout_ms: DEFAULT_TIMEOUT_MS,
			garbage_collection: GarbageCollectionPolicy::Enabled,
		}
	}
}

impl ClientSettings {
	/// Parses settings from a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(input)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads and parses a settings file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| SettingsError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Transport timeout as a [`Duration`].
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	fn validate(&self) -> Result<(), SettingsError> {
		if self.timeout_ms == 0 {
			return Err(SettingsError::ZeroTimeout);
		}
		Ok(())
	}
}
