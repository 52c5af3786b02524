use crate::config::TemplatePath;
use crate::error::SceneError;
use bevy::prelude::*;
use height_field::HeightQueryable;
use std::fmt::Debug;
use std::sync::Arc;

/// Name of the height query capability a loaded terrain must expose.
pub const HEIGHT_CAPABILITY: &str = "storage";

/// A freshly loaded terrain that has not yet been added to the scene.
pub trait TerrainInstance {
	/// The terrain's height query capability, if it has one.
	fn storage(&self) -> Option<Arc<dyn HeightQueryable>>;
}

/// The live scene the markers and terrain are added to.
///
/// Objects are referred to by `Handle` once added. The host owns rendering and lifetime of the
/// objects, the caller owns the bookkeeping of which handles it has added.
pub trait SceneHost {
	type Handle: Copy + Eq + Debug;
	type Terrain: TerrainInstance;

	/// Loads a new, uncached instance of the template. Must not touch the live scene.
	fn load_terrain(&mut self, template: &TemplatePath) -> Result<Self::Terrain, SceneError>;

	fn add_terrain(&mut self, terrain: Self::Terrain) -> Result<Self::Handle, SceneError>;

	fn add_marker(&mut self, position: Vec3) -> Result<Self::Handle, SceneError>;

	fn remove(&mut self, handle: Self::Handle) -> Result<(), SceneError>;

	/// Hint that unused memory may be reclaimed now. Advisory only.
	fn request_reclaim(&mut self) {}
}
