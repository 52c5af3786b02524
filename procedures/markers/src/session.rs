use crate::config::TemplatePath;
use crate::error::MarkerError;
use crate::host::{SceneHost, TerrainInstance, HEIGHT_CAPABILITY};
use height_field::{checked_height, HeightQueryable};
use std::fmt::Debug;
use std::sync::Arc;

/// One live terrain instance and its height query capability.
pub struct TerrainSession<K> {
	template: TemplatePath,
	handle: Option<K>,
	storage: Option<Arc<dyn HeightQueryable>>,
}

impl<K: Copy + Eq + Debug> TerrainSession<K> {
	/// Loads the template and adds it to the scene.
	///
	/// The capability is checked before the terrain is added, so a failed acquire leaves the
	/// scene untouched.
	pub fn acquire<H>(host: &mut H, template: &TemplatePath) -> Result<Self, MarkerError>
	where
		H: SceneHost<Handle = K>,
	{
		let terrain = host
			.load_terrain(template)
			.map_err(|source| MarkerError::AssetLoad { template: template.clone(), source })?;

		let storage = terrain.storage().ok_or_else(|| MarkerError::CapabilityMissing {
			template: template.clone(),
			capability: HEIGHT_CAPABILITY,
		})?;

		let handle = host.add_terrain(terrain)?;
		log::info!("Acquired terrain session for `{}` as {:?}", template, handle);

		Ok(Self { template: template.clone(), handle: Some(handle), storage: Some(storage) })
	}

	pub fn is_active(&self) -> bool {
		self.handle.is_some()
	}

	pub fn handle(&self) -> Option<K> {
		self.handle
	}

	pub fn template(&self) -> &TemplatePath {
		&self.template
	}

	/// Ground height at `(x, z)`. Non-finite answers are reported as failures.
	pub fn query_height(&self, x: f32, z: f32) -> Result<f32, MarkerError> {
		let storage = self.storage.as_ref().ok_or(MarkerError::SessionInactive)?;
		storage
			.query_height(x, z)
			.and_then(|height| checked_height(x, z, height))
			.map_err(|source| MarkerError::HeightQuery { x, z, source })
	}

	/// Removes the terrain from the scene. The session is invalidated even if the host fails.
	pub fn release<H>(&mut self, host: &mut H) -> Result<(), MarkerError>
	where
		H: SceneHost<Handle = K>,
	{
		let handle = self.handle.take().ok_or(MarkerError::SessionInactive)?;
		self.storage = None;

		host.remove(handle)?;
		log::info!("Released terrain session for `{}` ({:?})", self.template, handle);
		Ok(())
	}
}

impl<K: Debug> Debug for TerrainSession<K> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TerrainSession")
			.field("template", &self.template)
			.field("handle", &self.handle)
			.field("active", &self.storage.is_some())
			.finish()
	}
}
