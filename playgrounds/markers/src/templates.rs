use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use height_field::{
	HeightFieldGrid, HeightQueryFailure, HeightQueryable, PerlinHeightField, PerlinSettings,
};
use markers::{TemplatePath, TerrainInstance};
use std::collections::HashMap;
use std::sync::Arc;

/// Recipe for a terrain instance.
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainTemplate {
	/// Perlin heightfield with a `storage` height query.
	Perlin { settings: PerlinSettings, size: f32, resolution: usize },
	/// Flat decorative plane without a height query.
	Backdrop { size: f32 },
}

impl TerrainTemplate {
	/// Builds a new instance. Every call samples a new field and builds a new mesh.
	pub fn instantiate(
		&self,
		template: &TemplatePath,
	) -> Result<LoadedTerrain, HeightQueryFailure> {
		match self {
			TerrainTemplate::Perlin { settings, size, resolution } => {
				let field = Arc::new(PerlinHeightField::new(*settings));
				let origin = Vec2::splat(-size / 2.0);
				let grid = HeightFieldGrid::sample(field.as_ref(), origin, *size, *resolution)?;
				Ok(LoadedTerrain {
					template: template.clone(),
					mesh: heightfield_mesh(&grid),
					storage: Some(field),
				})
			}
			TerrainTemplate::Backdrop { size } => Ok(LoadedTerrain {
				template: template.clone(),
				mesh: Mesh::from(Plane3d::default().mesh().size(*size, *size)),
				storage: None,
			}),
		}
	}
}

/// A loaded terrain waiting to be added to the world.
pub struct LoadedTerrain {
	pub template: TemplatePath,
	pub mesh: Mesh,
	storage: Option<Arc<dyn HeightQueryable>>,
}

impl TerrainInstance for LoadedTerrain {
	fn storage(&self) -> Option<Arc<dyn HeightQueryable>> {
		self.storage.clone()
	}
}

/// Terrain templates the playground can load, by path.
#[derive(Resource, Debug, Clone, Default)]
pub struct TerrainTemplates {
	templates: HashMap<TemplatePath, TerrainTemplate>,
}

impl TerrainTemplates {
	/// `terrain/hills` and `terrain/backdrop`, with the hills seeded by `seed`.
	pub fn with_defaults(seed: u32) -> Self {
		Self::default()
			.with(
				"terrain/hills",
				TerrainTemplate::Perlin {
					settings: PerlinSettings {
						seed,
						extent: Some(200.0),
						clamp_to_extent: true,
						..PerlinSettings::default()
					},
					size: 400.0,
					resolution: 200,
				},
			)
			.with("terrain/backdrop", TerrainTemplate::Backdrop { size: 400.0 })
	}

	pub fn with(mut self, path: &str, template: TerrainTemplate) -> Self {
		self.templates.insert(TemplatePath::new(path), template);
		self
	}

	pub fn get(&self, path: &TemplatePath) -> Option<&TerrainTemplate> {
		self.templates.get(path)
	}
}

/// Triangle mesh over a sampled grid, in world coordinates.
pub fn heightfield_mesh(grid: &HeightFieldGrid) -> Mesh {
	let n = grid.samples_per_side();
	let step = grid.step();
	let height = |i: usize, j: usize| grid.heights[j.min(n - 1) * n + i.min(n - 1)];

	let mut positions = Vec::with_capacity(n * n);
	let mut normals = Vec::with_capacity(n * n);
	let mut uvs = Vec::with_capacity(n * n);

	for j in 0..n {
		for i in 0..n {
			let x = grid.origin.x + i as f32 * step;
			let z = grid.origin.y + j as f32 * step;
			positions.push([x, height(i, j), z]);

			// central differences, one-sided on the border
			let (il, ir) = (i.saturating_sub(1), (i + 1).min(n - 1));
			let (jl, jr) = (j.saturating_sub(1), (j + 1).min(n - 1));
			let dhdx = (height(ir, j) - height(il, j)) / ((ir - il).max(1) as f32 * step);
			let dhdz = (height(i, jr) - height(i, jl)) / ((jr - jl).max(1) as f32 * step);
			normals.push(Vec3::new(-dhdx, 1.0, -dhdz).normalize().to_array());

			uvs.push([i as f32 / (n - 1) as f32, j as f32 / (n - 1) as f32]);
		}
	}

	let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
	for j in 0..n - 1 {
		for i in 0..n - 1 {
			let a = (j * n + i) as u32;
			let b = a + 1;
			let c = a + n as u32;
			let d = c + 1;
			// counter-clockwise seen from above
			indices.extend_from_slice(&[a, c, b, b, c, d]);
		}
	}

	let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
	mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
	mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
	mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
	mesh.insert_indices(Indices::U32(indices));
	mesh
}
