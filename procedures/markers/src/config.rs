use crate::error::MarkerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a terrain template, resolved by the scene host's asset system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplatePath(String);

impl TemplatePath {
	pub fn new(path: impl Into<String>) -> Self {
		Self(path.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for TemplatePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for TemplatePath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

/// How a batch of markers is scattered around the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
	/// Markers per batch
	pub count: usize,
	/// Closest distance along the anchor axis
	pub radius_min: f32,
	/// Furthest distance along the anchor axis, inclusive
	pub radius_max: f32,
	/// Width of the lateral offset on X and Z, exclusive
	pub lateral_spread: f32,
	/// Lift above the ground height
	pub height_offset: f32,
}

impl Default for BatchConfig {
	fn default() -> Self {
		Self {
			count: 25,
			radius_min: 10.0,
			radius_max: 25.0,
			lateral_spread: 25.0,
			height_offset: 1.0,
		}
	}
}

impl BatchConfig {
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn with_radius(mut self, radius_min: f32, radius_max: f32) -> Self {
		self.radius_min = radius_min;
		self.radius_max = radius_max;
		self
	}

	pub fn with_lateral_spread(mut self, lateral_spread: f32) -> Self {
		self.lateral_spread = lateral_spread;
		self
	}

	pub fn with_height_offset(mut self, height_offset: f32) -> Self {
		self.height_offset = height_offset;
		self
	}

	pub fn validate(&self) -> Result<(), MarkerError> {
		if self.count == 0 {
			return Err(MarkerError::InvalidConfig("count must be at least 1".to_string()));
		}

		let fields = [
			("radius_min", self.radius_min),
			("radius_max", self.radius_max),
			("lateral_spread", self.lateral_spread),
			("height_offset", self.height_offset),
		];
		if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
			return Err(MarkerError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
		}

		if self.radius_min < 0.0 || self.lateral_spread < 0.0 {
			return Err(MarkerError::InvalidConfig(
				"radius and lateral spread must not be negative".to_string(),
			));
		}

		if self.radius_min > self.radius_max {
			return Err(MarkerError::InvalidConfig(format!(
				"radius_min {} exceeds radius_max {}",
				self.radius_min, self.radius_max
			)));
		}

		Ok(())
	}
}
