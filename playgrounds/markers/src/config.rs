use anyhow::Context;
use markers::BatchConfig;
use serde::Deserialize;
use std::path::Path;

/// Playground settings, read from a TOML file.
///
/// ```toml
/// template = "terrain/hills"
///
/// [batch]
/// count = 25
/// radius_min = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
	/// Terrain template to load markers onto
	pub template: String,
	pub batch: BatchConfig,
}

impl Default for PlaygroundConfig {
	fn default() -> Self {
		Self { template: "terrain/hills".to_string(), batch: BatchConfig::default() }
	}
}

impl PlaygroundConfig {
	pub fn from_toml(source: &str) -> anyhow::Result<Self> {
		let config: Self = toml::from_str(source).context("failed to parse playground config")?;
		config.batch.validate()?;
		Ok(config)
	}

	pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config {}", path.display()))?;
		Self::from_toml(&source)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_is_default() {
		assert_eq!(PlaygroundConfig::from_toml("").unwrap(), PlaygroundConfig::default());
	}

	#[test]
	fn test_partial_batch_keeps_defaults() {
		let config = PlaygroundConfig::from_toml(
			r#"
			template = "terrain/backdrop"

			[batch]
			count = 3
			height_offset = 0.5
			"#,
		)
		.unwrap();

		assert_eq!(config.template, "terrain/backdrop");
		assert_eq!(config.batch.count, 3);
		assert_eq!(config.batch.height_offset, 0.5);
		assert_eq!(config.batch.radius_max, 25.0);
	}

	#[test]
	fn test_invalid_batch_is_rejected() {
		let result = PlaygroundConfig::from_toml(
			r#"
			[batch]
			radius_min = 30.0
			radius_max = 5.0
			"#,
		);

		assert!(result.is_err());
	}
}
