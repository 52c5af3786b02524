use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Free-fly camera. Its transform is the viewer anchor for marker batches.
#[derive(Component)]
pub struct FlyCamera {
	/// Meters per second
	pub speed: f32,
	/// Radians per pixel of mouse motion
	pub sensitivity: f32,
	pub yaw: f32,
	pub pitch: f32,
}

const MOVEMENT_KEYS: [(KeyCode, Vec3); 6] = [
	(KeyCode::KeyW, Vec3::NEG_Z),
	(KeyCode::KeyS, Vec3::Z),
	(KeyCode::KeyA, Vec3::NEG_X),
	(KeyCode::KeyD, Vec3::X),
	(KeyCode::Space, Vec3::Y),
	(KeyCode::ShiftLeft, Vec3::NEG_Y),
];

pub fn setup_camera(mut commands: Commands) {
	// above the hills, looking across the origin
	let transform = Transform::from_xyz(0.0, 25.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y);
	let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);

	log::info!(
		"Camera at {:?}, yaw: {}°, pitch: {}°",
		transform.translation,
		yaw.to_degrees(),
		pitch.to_degrees()
	);

	commands.spawn((
		Camera3d::default(),
		transform,
		Projection::Perspective(PerspectiveProjection { near: 0.1, far: 2000.0, ..default() }),
		FlyCamera { speed: 20.0, sensitivity: 0.005, yaw, pitch },
	));
}

pub fn fly_camera(
	keyboard_input: Res<ButtonInput<KeyCode>>,
	mut mouse_motion: MessageReader<MouseMotion>,
	time: Res<Time>,
	mut query: Query<(&mut Transform, &mut FlyCamera), With<Camera3d>>,
) {
	let Ok((mut transform, mut camera)) = query.single_mut() else {
		return;
	};

	let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
	camera.yaw -= delta.x * camera.sensitivity;
	camera.pitch =
		(camera.pitch - delta.y * camera.sensitivity).clamp(-FRAC_PI_2 + 0.1, FRAC_PI_2 - 0.1);
	transform.rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);

	// movement keys are in camera space, vertical keys stay world aligned
	let local: Vec3 = MOVEMENT_KEYS
		.iter()
		.filter(|(key, _)| keyboard_input.pressed(*key))
		.map(|(_, direction)| *direction)
		.sum();
	let horizontal = transform.rotation * Vec3::new(local.x, 0.0, local.z);
	let movement = horizontal + Vec3::Y * local.y;

	if let Some(direction) = movement.try_normalize() {
		transform.translation += direction * camera.speed * time.delta_secs();
	}
}
