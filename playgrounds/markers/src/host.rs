use crate::templates::{LoadedTerrain, TerrainTemplates};
use bevy::prelude::*;
use markers::{SceneError, SceneHost, TemplatePath};

/// Root entity of a loaded terrain.
#[derive(Component, Debug, Clone)]
pub struct TerrainRoot {
	pub template: TemplatePath,
}

/// A marker sphere placed by the controller.
#[derive(Component, Debug, Clone, Copy)]
pub struct MarkerSphere;

/// Mesh and material shared by every marker sphere.
#[derive(Resource, Clone)]
pub struct MarkerAssets {
	pub mesh: Handle<Mesh>,
	pub material: Handle<StandardMaterial>,
}

pub fn setup_marker_assets(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	// radius 1, height 2
	let mesh = meshes.add(Sphere::new(1.0));
	let material = materials.add(StandardMaterial {
		base_color: Color::hsla(12.0, 0.85, 0.55, 1.0),
		perceptual_roughness: 0.5,
		..default()
	});
	commands.insert_resource(MarkerAssets { mesh, material });
}

/// Scene host backed by the Bevy world. Objects are entities.
pub struct WorldSceneHost<'w> {
	world: &'w mut World,
}

impl<'w> WorldSceneHost<'w> {
	pub fn new(world: &'w mut World) -> Self {
		Self { world }
	}
}

impl SceneHost for WorldSceneHost<'_> {
	type Handle = Entity;
	type Terrain = LoadedTerrain;

	fn load_terrain(&mut self, template: &TemplatePath) -> Result<LoadedTerrain, SceneError> {
		let unresolved = |reason: String| SceneError::UnresolvedTemplate {
			template: template.to_string(),
			reason,
		};

		let templates = self
			.world
			.get_resource::<TerrainTemplates>()
			.ok_or_else(|| unresolved("no terrain templates registered".to_string()))?;
		let terrain_template = templates
			.get(template)
			.ok_or_else(|| unresolved("unknown template".to_string()))?;

		terrain_template.instantiate(template).map_err(|e| unresolved(e.to_string()))
	}

	fn add_terrain(&mut self, terrain: LoadedTerrain) -> Result<Entity, SceneError> {
		let mesh = self
			.world
			.get_resource_mut::<Assets<Mesh>>()
			.ok_or_else(|| SceneError::Rejected("mesh assets unavailable".to_string()))?
			.add(terrain.mesh);
		let material = self
			.world
			.get_resource_mut::<Assets<StandardMaterial>>()
			.ok_or_else(|| SceneError::Rejected("material assets unavailable".to_string()))?
			.add(StandardMaterial {
				base_color: Color::hsla(46.0, 0.22, 0.62, 1.0),
				metallic: 0.0,
				perceptual_roughness: 0.7,
				..default()
			});

		let entity = self
			.world
			.spawn((
				TerrainRoot { template: terrain.template },
				Mesh3d(mesh),
				MeshMaterial3d(material),
				Transform::IDENTITY,
			))
			.id();

		log::debug!("Spawned terrain {:?}", entity);
		Ok(entity)
	}

	fn add_marker(&mut self, position: Vec3) -> Result<Entity, SceneError> {
		let assets = self
			.world
			.get_resource::<MarkerAssets>()
			.cloned()
			.ok_or_else(|| SceneError::Rejected("marker assets are not loaded".to_string()))?;

		Ok(self
			.world
			.spawn((
				MarkerSphere,
				Mesh3d(assets.mesh),
				MeshMaterial3d(assets.material),
				Transform::from_translation(position),
			))
			.id())
	}

	fn remove(&mut self, handle: Entity) -> Result<(), SceneError> {
		if self.world.despawn(handle) {
			Ok(())
		} else {
			Err(SceneError::MissingObject(format!("{:?}", handle)))
		}
	}

	fn request_reclaim(&mut self) {
		// Bevy drops mesh and material assets once their last handle is gone
		log::info!("Reclaim requested, assets are freed as their handles drop");
	}
}
