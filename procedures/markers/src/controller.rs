use crate::anchor::{CandidateSampler, ViewerAnchor};
use crate::config::{BatchConfig, TemplatePath};
use crate::error::MarkerError;
use crate::host::SceneHost;
use crate::session::TerrainSession;
use bevy::prelude::*;
use height_field::checked_height;
use rand::Rng;
use std::fmt::Debug;

/// Lifecycle of the controller. `Spawning` and `Removing` only exist inside a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
	#[default]
	Idle,
	Spawning,
	Spawned,
	Removing,
}

/// A marker the controller has added to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<K> {
	pub handle: K,
	pub position: Vec3,
}

/// Markers in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerBatch<K> {
	markers: Vec<Marker<K>>,
}

impl<K> Default for MarkerBatch<K> {
	fn default() -> Self {
		Self { markers: Vec::new() }
	}
}

impl<K> MarkerBatch<K> {
	pub fn len(&self) -> usize {
		self.markers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.markers.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Marker<K>> {
		self.markers.iter()
	}

	pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
		self.markers.iter().map(|marker| marker.position)
	}
}

/// Spawns a batch of markers on a terrain around the viewer and tears it down again.
///
/// The controller is the single source of truth for what it has spawned: the terrain session
/// and the handle of every marker are tracked here so each spawn can be undone exactly. Objects a
/// failed rollback could not remove stay tracked as stranded until `remove_batch` retries them.
#[derive(Debug)]
pub struct MarkerBatchController<K> {
	template: TemplatePath,
	config: BatchConfig,
	state: BatchState,
	session: Option<TerrainSession<K>>,
	batch: MarkerBatch<K>,
	stranded: Vec<K>,
}

impl<K: Copy + Eq + Debug> MarkerBatchController<K> {
	pub fn new(template: TemplatePath) -> Self {
		Self::with_config(template, BatchConfig::default())
	}

	pub fn with_config(template: TemplatePath, config: BatchConfig) -> Self {
		Self {
			template,
			config,
			state: BatchState::Idle,
			session: None,
			batch: MarkerBatch::default(),
			stranded: Vec::new(),
		}
	}

	pub fn state(&self) -> BatchState {
		self.state
	}

	pub fn batch(&self) -> &MarkerBatch<K> {
		&self.batch
	}

	pub fn session(&self) -> Option<&TerrainSession<K>> {
		self.session.as_ref()
	}

	pub fn is_active(&self) -> bool {
		self.session.is_some()
	}

	/// Handles left in the scene by an incomplete rollback.
	pub fn stranded(&self) -> &[K] {
		&self.stranded
	}

	pub fn template(&self) -> &TemplatePath {
		&self.template
	}

	pub fn config(&self) -> &BatchConfig {
		&self.config
	}

	/// Spawns a batch with the controller's configuration.
	pub fn spawn_batch<H, R>(
		&mut self,
		host: &mut H,
		anchor: &ViewerAnchor,
		rng: &mut R,
	) -> Result<&MarkerBatch<K>, MarkerError>
	where
		H: SceneHost<Handle = K>,
		R: Rng,
	{
		let config = self.config;
		self.spawn_batch_with(host, anchor, &config, rng)
	}

	/// Acquires a terrain session and places `config.count` markers above the ground.
	///
	/// Either the whole batch is placed or nothing is: on any failure every marker added by this
	/// call is removed again, the session is released and the controller is back to `Idle`. If
	/// the host refuses part of that cleanup, `RollbackIncomplete` is returned and the leftover
	/// handles are kept for the next `remove_batch`.
	pub fn spawn_batch_with<H, R>(
		&mut self,
		host: &mut H,
		anchor: &ViewerAnchor,
		config: &BatchConfig,
		rng: &mut R,
	) -> Result<&MarkerBatch<K>, MarkerError>
	where
		H: SceneHost<Handle = K>,
		R: Rng,
	{
		if self.session.is_some() || !self.batch.is_empty() || !self.stranded.is_empty() {
			return Err(MarkerError::AlreadySpawned);
		}
		config.validate()?;

		self.state = BatchState::Spawning;

		let mut session = match TerrainSession::acquire(host, &self.template) {
			Ok(session) => session,
			Err(e) => {
				self.state = BatchState::Idle;
				return Err(e);
			}
		};

		let mut markers = Vec::with_capacity(config.count);
		if let Err(e) = Self::place_markers(host, &session, anchor, config, rng, &mut markers) {
			log::error!(
				"Spawning markers failed after {} of {}, rolling back: {}",
				markers.len(),
				config.count,
				e
			);
			let failures = self.rollback(host, &mut session, markers);
			self.state = BatchState::Idle;
			if failures.is_empty() {
				return Err(e);
			}
			return Err(MarkerError::RollbackIncomplete { cause: Box::new(e), failures });
		}

		log::info!("Spawned {} markers around {:?}", markers.len(), anchor.position);

		self.session = Some(session);
		self.batch = MarkerBatch { markers };
		self.state = BatchState::Spawned;
		Ok(&self.batch)
	}

	fn place_markers<H, R>(
		host: &mut H,
		session: &TerrainSession<K>,
		anchor: &ViewerAnchor,
		config: &BatchConfig,
		rng: &mut R,
		markers: &mut Vec<Marker<K>>,
	) -> Result<(), MarkerError>
	where
		H: SceneHost<Handle = K>,
		R: Rng,
	{
		let sampler = CandidateSampler::new(config);

		for _ in 0..config.count {
			let candidate = sampler.sample(anchor, rng);
			let ground = session.query_height(candidate.x, candidate.z)?;
			// the offset can still push a finite ground height out of range
			let (x, z) = (candidate.x, candidate.z);
			let height = checked_height(x, z, ground + config.height_offset)
				.map_err(|source| MarkerError::HeightQuery { x, z, source })?;
			let position = Vec3::new(x, height, z);

			let handle = host.add_marker(position)?;
			log::debug!("Placed marker {:?} at {:?}", handle, position);
			markers.push(Marker { handle, position });
		}

		Ok(())
	}

	/// Undoes a partial spawn. Handles the host refused to remove are kept as stranded.
	fn rollback<H>(
		&mut self,
		host: &mut H,
		session: &mut TerrainSession<K>,
		markers: Vec<Marker<K>>,
	) -> Vec<MarkerError>
	where
		H: SceneHost<Handle = K>,
	{
		let mut failures = Vec::new();

		for marker in markers.into_iter().rev() {
			if let Err(e) = host.remove(marker.handle) {
				log::warn!("Failed to roll back marker {:?}: {}", marker.handle, e);
				self.stranded.push(marker.handle);
				failures.push(MarkerError::Scene(e));
			}
		}

		let terrain = session.handle();
		if let Err(e) = session.release(host) {
			log::warn!("Failed to release terrain session during rollback: {}", e);
			self.stranded.extend(terrain);
			failures.push(e);
		}

		failures
	}

	/// Removes every tracked marker, then the terrain, then anything a failed rollback stranded.
	///
	/// All removals are attempted even if some fail. The batch is cleared and the session is
	/// released regardless, failures are reported together afterwards.
	pub fn remove_batch<H>(&mut self, host: &mut H) -> Result<(), MarkerError>
	where
		H: SceneHost<Handle = K>,
	{
		if self.session.is_none() && self.stranded.is_empty() {
			return Err(MarkerError::NothingToRemove);
		}

		self.state = BatchState::Removing;

		let session = self.session.take();
		let markers = std::mem::take(&mut self.batch).markers;
		let stranded = std::mem::take(&mut self.stranded);
		let attempted = markers.len() + usize::from(session.is_some()) + stranded.len();
		let mut failures = Vec::new();

		for handle in markers.into_iter().map(|marker| marker.handle) {
			if let Err(e) = host.remove(handle) {
				log::warn!("Failed to remove marker {:?}: {}", handle, e);
				failures.push(MarkerError::Scene(e));
			}
		}

		if let Some(mut session) = session {
			if let Err(e) = session.release(host) {
				log::warn!("Failed to release terrain session: {}", e);
				failures.push(e);
			}
		}

		for handle in stranded {
			if let Err(e) = host.remove(handle) {
				log::warn!("Failed to remove stranded object {:?}: {}", handle, e);
				failures.push(MarkerError::Scene(e));
			}
		}

		self.state = BatchState::Idle;

		if failures.is_empty() {
			log::info!("Removed marker batch and terrain");
			Ok(())
		} else {
			Err(MarkerError::Teardown { attempted, failures })
		}
	}

	/// Forwards a reclaim hint to the host. Never changes marker or session state.
	pub fn request_reclaim<H: SceneHost>(&self, host: &mut H) {
		log::debug!("Requesting memory reclaim from scene host");
		host.request_reclaim();
	}
}
