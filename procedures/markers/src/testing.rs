//! In-memory scene host and height services used by the unit tests.

use crate::config::TemplatePath;
use crate::error::SceneError;
use crate::host::{SceneHost, TerrainInstance};
use bevy::prelude::*;
use height_field::{HeightQueryFailure, HeightQueryable};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
	Terrain(String),
	Marker(Vec3),
}

pub struct TestTerrain {
	template: String,
	storage: Option<Arc<dyn HeightQueryable>>,
}

impl TerrainInstance for TestTerrain {
	fn storage(&self) -> Option<Arc<dyn HeightQueryable>> {
		self.storage.clone()
	}
}

/// Scene host that keeps its objects in a map and records every request.
#[derive(Default)]
pub struct RecordingHost {
	next_id: u32,
	objects: BTreeMap<ObjectId, SceneObject>,
	history: HashMap<ObjectId, SceneObject>,
	templates: HashMap<String, Option<Arc<dyn HeightQueryable>>>,
	accept_markers: Option<usize>,
	markers_added: usize,
	failing_removals: HashSet<ObjectId>,
	pub load_requests: usize,
	pub removals: Vec<ObjectId>,
	pub reclaim_requests: usize,
}

impl RecordingHost {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_template(mut self, name: &str, field: impl HeightQueryable + 'static) -> Self {
		let storage: Arc<dyn HeightQueryable> = Arc::new(field);
		self.templates.insert(name.to_string(), Some(storage));
		self
	}

	/// A template whose instances carry no height capability.
	pub fn with_bare_template(mut self, name: &str) -> Self {
		self.templates.insert(name.to_string(), None);
		self
	}

	/// Accepts `count` marker registrations, then rejects every further one.
	pub fn accept_markers(mut self, count: usize) -> Self {
		self.accept_markers = Some(count);
		self
	}

	pub fn fail_removal_of(&mut self, id: ObjectId) {
		self.failing_removals.insert(id);
	}

	pub fn allow_removal_of(&mut self, id: ObjectId) {
		self.failing_removals.remove(&id);
	}

	pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
		self.objects.get(&id)
	}

	pub fn object_count(&self) -> usize {
		self.objects.len()
	}

	pub fn terrain_count(&self) -> usize {
		self.objects.values().filter(|o| matches!(o, SceneObject::Terrain(_))).count()
	}

	pub fn marker_count(&self) -> usize {
		self.objects.values().filter(|o| matches!(o, SceneObject::Marker(_))).count()
	}

	pub fn marker_removal_requests(&self) -> usize {
		self.removals
			.iter()
			.filter(|id| matches!(self.history.get(id), Some(SceneObject::Marker(_))))
			.count()
	}

	pub fn terrain_removal_requests(&self) -> usize {
		self.removals
			.iter()
			.filter(|id| matches!(self.history.get(id), Some(SceneObject::Terrain(_))))
			.count()
	}

	fn insert(&mut self, object: SceneObject) -> ObjectId {
		let id = ObjectId(self.next_id);
		self.next_id += 1;
		self.history.insert(id, object.clone());
		self.objects.insert(id, object);
		id
	}
}

impl SceneHost for RecordingHost {
	type Handle = ObjectId;
	type Terrain = TestTerrain;

	fn load_terrain(&mut self, template: &TemplatePath) -> Result<TestTerrain, SceneError> {
		self.load_requests += 1;
		let storage = self.templates.get(template.as_str()).cloned().ok_or_else(|| {
			SceneError::UnresolvedTemplate {
				template: template.to_string(),
				reason: "no such template".to_string(),
			}
		})?;
		Ok(TestTerrain { template: template.to_string(), storage })
	}

	fn add_terrain(&mut self, terrain: TestTerrain) -> Result<ObjectId, SceneError> {
		Ok(self.insert(SceneObject::Terrain(terrain.template)))
	}

	fn add_marker(&mut self, position: Vec3) -> Result<ObjectId, SceneError> {
		if self.accept_markers.is_some_and(|limit| self.markers_added >= limit) {
			return Err(SceneError::Rejected("marker limit reached".to_string()));
		}
		self.markers_added += 1;
		Ok(self.insert(SceneObject::Marker(position)))
	}

	fn remove(&mut self, handle: ObjectId) -> Result<(), SceneError> {
		self.removals.push(handle);
		if self.failing_removals.contains(&handle) {
			return Err(SceneError::Rejected(format!("{:?} is pinned", handle)));
		}
		self.objects
			.remove(&handle)
			.map(|_| ())
			.ok_or_else(|| SceneError::MissingObject(format!("{:?}", handle)))
	}

	fn request_reclaim(&mut self) {
		self.reclaim_requests += 1;
	}
}

/// Answers the first `successes` queries from `inner`, then fails every query.
pub struct FailingAfter<H> {
	inner: H,
	successes: usize,
	calls: AtomicUsize,
}

impl<H> FailingAfter<H> {
	pub fn new(inner: H, successes: usize) -> Self {
		Self { inner, successes, calls: AtomicUsize::new(0) }
	}
}

impl<H: HeightQueryable> HeightQueryable for FailingAfter<H> {
	fn query_height(&self, x: f32, z: f32) -> Result<f32, HeightQueryFailure> {
		if self.calls.fetch_add(1, Ordering::SeqCst) >= self.successes {
			return Err(HeightQueryFailure::Service("terrain storage unavailable".to_string()));
		}
		self.inner.query_height(x, z)
	}
}

/// Returns NaN from the `nth` query on, skipping the finiteness check of real fields.
pub struct NanAfter {
	nth: usize,
	calls: AtomicUsize,
}

impl NanAfter {
	pub fn new(nth: usize) -> Self {
		Self { nth, calls: AtomicUsize::new(0) }
	}
}

impl HeightQueryable for NanAfter {
	fn query_height(&self, _x: f32, _z: f32) -> Result<f32, HeightQueryFailure> {
		if self.calls.fetch_add(1, Ordering::SeqCst) >= self.nth {
			Ok(f32::NAN)
		} else {
			Ok(0.5)
		}
	}
}
