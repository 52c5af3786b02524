use crate::input::{MarkerControl, RECLAIM_KEY, REMOVE_KEY, SPAWN_KEY};
use bevy::prelude::*;

#[derive(Component)]
pub struct StatusText;

pub fn setup_status_ui(mut commands: Commands) {
	log::info!("Setting up status UI");

	commands
		.spawn((
			Node {
				position_type: PositionType::Absolute,
				top: Val::Px(10.0),
				left: Val::Px(10.0),
				padding: UiRect::all(Val::Px(10.0)),
				..default()
			},
			BackgroundColor(Color::hsla(201.0, 0.69, 0.62, 0.7)),
		))
		.with_children(|parent| {
			parent.spawn((
				Text::new("State: Idle"),
				TextFont { font_size: 20.0, ..default() },
				TextColor(Color::WHITE),
				StatusText,
			));
		});
}

pub fn update_status_display(
	camera_query: Query<&Transform, With<Camera3d>>,
	mut text_query: Query<&mut Text, With<StatusText>>,
	control: Res<MarkerControl>,
) {
	let Ok(mut text) = text_query.single_mut() else {
		return;
	};

	let position = camera_query.single().map(|transform| transform.translation).unwrap_or_default();
	let controller = &control.0;

	text.0 = format!(
		"Position: ({:.2}, {:.2}, {:.2})\nTerrain: {}\nState: {:?}\nMarkers: {}\n[{:?}] spawn behind camera  [{:?}] remove  [{:?}] reclaim",
		position.x,
		position.y,
		position.z,
		controller.template(),
		controller.state(),
		controller.batch().len(),
		SPAWN_KEY,
		REMOVE_KEY,
		RECLAIM_KEY,
	);
}
