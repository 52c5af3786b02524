use crate::{HeightQueryFailure, HeightQueryable};
use bevy::prelude::*;
use rayon::prelude::*;

/// Heights sampled over a square, axis-aligned patch of the XZ plane.
///
/// Samples are stored with X fastest, then Z, with `resolution + 1` samples per side.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightFieldGrid {
	/// Lower corner of the patch in world XZ
	pub origin: Vec2,
	pub size: f32,
	/// Cells per side
	pub resolution: usize,
	pub heights: Vec<f32>,
}

impl HeightFieldGrid {
	/// Samples `field` over the patch, one Z row per rayon task.
	pub fn sample<H: HeightQueryable + ?Sized>(
		field: &H,
		origin: Vec2,
		size: f32,
		resolution: usize,
	) -> Result<Self, HeightQueryFailure> {
		let resolution = resolution.max(1);
		let n = resolution + 1;
		let step = size / resolution as f32;

		let rows: Vec<Vec<f32>> = (0..n)
			.into_par_iter()
			.map(|j| {
				let z = origin.y + j as f32 * step;
				(0..n)
					.map(|i| field.query_height(origin.x + i as f32 * step, z))
					.collect::<Result<Vec<_>, _>>()
			})
			.collect::<Result<Vec<_>, _>>()?;

		let heights = rows.into_iter().flatten().collect();

		log::debug!(
			"Sampled {}x{} height grid at {:?} with size {}",
			n,
			n,
			origin,
			size
		);

		Ok(Self { origin, size, resolution, heights })
	}

	pub fn samples_per_side(&self) -> usize {
		self.resolution + 1
	}

	pub fn step(&self) -> f32 {
		self.size / self.resolution as f32
	}

	pub fn height(&self, i: usize, j: usize) -> Option<f32> {
		let n = self.samples_per_side();
		if i >= n || j >= n {
			return None;
		}
		self.heights.get(j * n + i).copied()
	}

	/// World position of sample `(i, j)`.
	pub fn position(&self, i: usize, j: usize) -> Option<Vec3> {
		let y = self.height(i, j)?;
		let step = self.step();
		Some(Vec3::new(self.origin.x + i as f32 * step, y, self.origin.y + j as f32 * step))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::FlatHeightField;

	struct Ramp;

	impl HeightQueryable for Ramp {
		fn query_height(&self, x: f32, _z: f32) -> Result<f32, HeightQueryFailure> {
			if x > 100.0 {
				return Err(HeightQueryFailure::OutOfDomain { x, z: 0.0 });
			}
			Ok(x * 0.5)
		}
	}

	#[test]
	fn test_sample_flat_grid() {
		let grid = HeightFieldGrid::sample(&FlatHeightField(1.5), Vec2::new(-10.0, -10.0), 20.0, 4)
			.unwrap();

		assert_eq!(grid.samples_per_side(), 5);
		assert_eq!(grid.heights.len(), 25);
		assert!(grid.heights.iter().all(|h| *h == 1.5));
		assert_eq!(grid.position(4, 4), Some(Vec3::new(10.0, 1.5, 10.0)));
		assert_eq!(grid.height(5, 0), None);
	}

	#[test]
	fn test_sample_layout_is_x_fastest() {
		let grid = HeightFieldGrid::sample(&Ramp, Vec2::ZERO, 8.0, 2).unwrap();

		assert_eq!(grid.height(0, 0), Some(0.0));
		assert_eq!(grid.height(1, 0), Some(2.0));
		assert_eq!(grid.height(2, 2), Some(4.0));
		assert_eq!(grid.heights[1], 2.0);
	}

	#[test]
	fn test_sample_propagates_failure() {
		let result = HeightFieldGrid::sample(&Ramp, Vec2::new(90.0, 0.0), 20.0, 2);
		assert!(matches!(result, Err(HeightQueryFailure::OutOfDomain { .. })));
	}
}
