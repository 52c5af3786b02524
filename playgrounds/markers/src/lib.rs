use bevy::prelude::*;
use std::f32::consts::PI;

mod camera;
mod config;
mod host;
mod input;
mod templates;
mod ui;

use markers::{MarkerBatchController, TemplatePath};

pub use camera::FlyCamera;
pub use config::PlaygroundConfig;
pub use host::{MarkerSphere, TerrainRoot, WorldSceneHost};
pub use input::MarkerControl;
pub use templates::{TerrainTemplate, TerrainTemplates};

pub use markers;

pub struct MarkersPlugin {
	pub seed: u32,
	pub config: PlaygroundConfig,
}

impl Plugin for MarkersPlugin {
	fn build(&self, app: &mut App) {
		let controller = MarkerBatchController::with_config(
			TemplatePath::new(self.config.template.as_str()),
			self.config.batch,
		);

		app.insert_resource(ClearColor(Color::hsla(201.0, 0.69, 0.62, 1.0)))
			.insert_resource(TerrainTemplates::with_defaults(self.seed))
			.insert_resource(MarkerControl(controller))
			.add_systems(
				Startup,
				(
					camera::setup_camera,
					setup_lighting,
					host::setup_marker_assets,
					ui::setup_status_ui,
				),
			)
			.add_systems(
				Update,
				(camera::fly_camera, input::handle_marker_keys, ui::update_status_display),
			);
	}
}

fn setup_lighting(mut commands: Commands) {
	commands.insert_resource(AmbientLight {
		color: Color::WHITE,
		brightness: 800.0,
		affects_lightmapped_meshes: true,
	});

	// sun
	commands.spawn((
		DirectionalLight { illuminance: 10000.0, shadows_enabled: true, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 4.0, PI / 4.0, 0.0)),
	));

	// fill
	commands.spawn((
		DirectionalLight { illuminance: 500.0, shadows_enabled: false, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, PI / 4.0, -PI / 4.0, 0.0)),
	));
}
