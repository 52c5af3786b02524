use crate::{checked_height, HeightQueryFailure, HeightQueryable};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Parameters of a multi-octave Perlin heightfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerlinSettings {
	pub seed: u32,
	/// Frequency of the first octave
	pub frequency: f64,
	pub octaves: usize,
	/// Vertical scale applied after shaping
	pub height_scale: f32,
	/// >1 exaggerates contrast, <1 flattens
	pub exponent: f32,
	/// Half size of the square domain centred on the origin, `None` for unbounded
	pub extent: Option<f32>,
	/// When set, queries past the extent read the border height instead of failing
	pub clamp_to_extent: bool,
}

impl Default for PerlinSettings {
	fn default() -> Self {
		Self {
			seed: 12345,
			frequency: 0.05,
			octaves: 4,
			height_scale: 5.0,
			exponent: 1.1,
			extent: None,
			clamp_to_extent: false,
		}
	}
}

/// Heightfield `y = height(x, z)` sampled from Perlin noise.
#[derive(Debug, Clone)]
pub struct PerlinHeightField {
	perlin: Perlin,
	settings: PerlinSettings,
}

impl PerlinHeightField {
	pub fn new(settings: PerlinSettings) -> Self {
		Self { perlin: Perlin::new(settings.seed), settings }
	}

	pub fn with_seed(seed: u32) -> Self {
		Self::new(PerlinSettings { seed, ..PerlinSettings::default() })
	}

	pub fn settings(&self) -> &PerlinSettings {
		&self.settings
	}

	/// Raw height without any domain handling.
	fn height_at(&self, world_x: f32, world_z: f32) -> f32 {
		let mut height = 0.0;
		let mut amplitude = 1.0;
		let mut frequency = self.settings.frequency;

		for _ in 0..self.settings.octaves {
			let sample =
				self.perlin.get([world_x as f64 * frequency, world_z as f64 * frequency]) as f32;
			height += sample * amplitude;
			amplitude *= 0.5;
			frequency *= 2.0;
		}

		let sign = height.signum();
		let height = sign * height.abs().powf(self.settings.exponent);
		height * self.settings.height_scale
	}

	fn resolve_domain(&self, x: f32, z: f32) -> Result<(f32, f32), HeightQueryFailure> {
		let Some(extent) = self.settings.extent else {
			return Ok((x, z));
		};

		if x.abs() <= extent && z.abs() <= extent {
			return Ok((x, z));
		}

		if self.settings.clamp_to_extent {
			Ok((x.clamp(-extent, extent), z.clamp(-extent, extent)))
		} else {
			Err(HeightQueryFailure::OutOfDomain { x, z })
		}
	}
}

impl HeightQueryable for PerlinHeightField {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure> {
		if !x.is_finite() || !z.is_finite() {
			return Err(HeightQueryFailure::OutOfDomain { x, z });
		}
		let (sx, sz) = self.resolve_domain(x, z)?;
		checked_height(x, z, self.height_at(sx, sz))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_same_seed_same_heights() {
		let a = PerlinHeightField::with_seed(7);
		let b = PerlinHeightField::with_seed(7);

		for i in 0..16 {
			let x = i as f32 * 3.7 - 20.0;
			let z = i as f32 * -1.3 + 4.0;
			assert_eq!(a.query_height(x, z), b.query_height(x, z));
		}
	}

	#[test]
	fn test_heights_bounded_by_scale() {
		let field = PerlinHeightField::with_seed(99);
		// fBm with halving amplitudes stays under 2 before shaping
		let bound = 2.0_f32.powf(field.settings().exponent) * field.settings().height_scale;

		for i in 0..64 {
			let x = (i % 8) as f32 * 11.0;
			let z = (i / 8) as f32 * 11.0;
			let height = field.query_height(x, z).unwrap();
			assert!(height.is_finite());
			assert!(height.abs() <= bound, "height {} exceeds {}", height, bound);
		}
	}

	#[test]
	fn test_extent_rejects_outside_queries() {
		let field = PerlinHeightField::new(PerlinSettings {
			extent: Some(50.0),
			..PerlinSettings::default()
		});

		assert!(field.query_height(49.0, -49.0).is_ok());
		assert_eq!(
			field.query_height(51.0, 0.0),
			Err(HeightQueryFailure::OutOfDomain { x: 51.0, z: 0.0 })
		);
	}

	#[test]
	fn test_extent_clamps_when_enabled() {
		let field = PerlinHeightField::new(PerlinSettings {
			extent: Some(50.0),
			clamp_to_extent: true,
			..PerlinSettings::default()
		});

		assert_eq!(field.query_height(80.0, 10.0), field.query_height(50.0, 10.0));
	}

	#[test]
	fn test_non_finite_coordinates_are_rejected() {
		let field = PerlinHeightField::with_seed(1);
		assert!(field.query_height(f32::NAN, 0.0).is_err());
	}
}
