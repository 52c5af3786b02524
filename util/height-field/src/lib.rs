pub mod grid;
pub mod perlin;

pub use grid::HeightFieldGrid;
pub use perlin::{PerlinHeightField, PerlinSettings};

use std::sync::Arc;

/// Failure to resolve the ground height at a horizontal coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeightQueryFailure {
	#[error("height at ({x}, {z}) is not finite: {height}")]
	NonFinite { x: f32, z: f32, height: f32 },
	#[error("({x}, {z}) is outside the height field")]
	OutOfDomain { x: f32, z: f32 },
	#[error("height service error: {0}")]
	Service(String),
}

/// Trait for terrain surfaces that can be queried for ground height.
///
/// Implementors describe the heightfield `y = height(x, z)`.
/// A query is expected to be cheap and side-effect free, it may be issued any number of times.
pub trait HeightQueryable: Send + Sync {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure>;
}

impl<T: HeightQueryable + ?Sized> HeightQueryable for Arc<T> {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure> {
		(**self).query_height(x, z)
	}
}

impl<T: HeightQueryable + ?Sized> HeightQueryable for Box<T> {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure> {
		(**self).query_height(x, z)
	}
}

/// Accepts a raw height sample only if it is finite.
pub fn checked_height(x: f32, z: f32, height: f32) -> Result<f32, HeightQueryFailure> {
	if height.is_finite() {
		Ok(height)
	} else {
		Err(HeightQueryFailure::NonFinite { x, z, height })
	}
}

/// A constant height everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHeightField(pub f32);

impl HeightQueryable for FlatHeightField {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure> {
		checked_height(x, z, self.0)
	}
}
