use crate::config::BatchConfig;
use crate::error::MarkerError;
use bevy::prelude::*;
use rand::Rng;

/// The viewer pose a batch is scattered around. Sampled once per spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerAnchor {
	pub position: Vec3,
	/// Unit length
	pub forward_axis: Vec3,
}

impl ViewerAnchor {
	pub fn new(position: Vec3, forward_axis: Vec3) -> Result<Self, MarkerError> {
		if !position.is_finite() {
			return Err(MarkerError::InvalidConfig(format!(
				"anchor position {:?} is not finite",
				position
			)));
		}

		let forward_axis = forward_axis.try_normalize().ok_or_else(|| {
			MarkerError::InvalidConfig(format!(
				"anchor axis {:?} cannot be normalized",
				forward_axis
			))
		})?;

		Ok(Self { position, forward_axis })
	}

	pub fn from_transform(transform: &Transform) -> Self {
		Self { position: transform.translation, forward_axis: *transform.forward() }
	}
}

/// Draws candidate marker positions relative to a viewer anchor.
///
/// Each candidate is `position + lateral - forward_axis * distance`, where the lateral offset is
/// uniform in `[0, lateral_spread)` on world X and Z and the distance is uniform in
/// `[radius_min, radius_max]`. Candidates are never rejected, so they may land past the usable
/// extent of the terrain.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSampler {
	radius_min: f32,
	radius_max: f32,
	lateral_spread: f32,
}

impl CandidateSampler {
	pub fn new(config: &BatchConfig) -> Self {
		Self {
			radius_min: config.radius_min,
			radius_max: config.radius_max,
			lateral_spread: config.lateral_spread,
		}
	}

	fn lateral<R: Rng>(&self, rng: &mut R) -> f32 {
		// empty ranges panic in rand
		if self.lateral_spread > 0.0 {
			rng.random_range(0.0..self.lateral_spread)
		} else {
			0.0
		}
	}

	pub fn sample<R: Rng>(&self, anchor: &ViewerAnchor, rng: &mut R) -> Vec3 {
		let lateral = Vec3::new(self.lateral(rng), 0.0, self.lateral(rng));
		let distance = rng.random_range(self.radius_min..=self.radius_max);
		anchor.position + lateral - anchor.forward_axis * distance
	}
}
