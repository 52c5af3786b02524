use crate::host::WorldSceneHost;
use bevy::prelude::*;
use markers::{MarkerBatchController, ViewerAnchor};

pub const SPAWN_KEY: KeyCode = KeyCode::KeyT;
pub const REMOVE_KEY: KeyCode = KeyCode::KeyR;
pub const RECLAIM_KEY: KeyCode = KeyCode::KeyG;

/// The marker controller driven by the playground, one batch of entities at a time.
#[derive(Resource, Debug)]
pub struct MarkerControl(pub MarkerBatchController<Entity>);

fn viewer_anchor(world: &mut World) -> Option<ViewerAnchor> {
	let mut cameras = world.query_filtered::<&Transform, With<Camera3d>>();
	cameras.single(world).ok().map(ViewerAnchor::from_transform)
}

/// Exclusive system: the controller needs the whole world as its scene host.
pub fn handle_marker_keys(world: &mut World) {
	let Some(keys) = world.get_resource::<ButtonInput<KeyCode>>() else {
		return;
	};
	let (spawn, remove, reclaim) = (
		keys.just_pressed(SPAWN_KEY),
		keys.just_pressed(REMOVE_KEY),
		keys.just_pressed(RECLAIM_KEY),
	);
	if !(spawn || remove || reclaim) || !world.contains_resource::<MarkerControl>() {
		return;
	}

	let anchor = viewer_anchor(world);

	world.resource_scope(|world, mut control: Mut<MarkerControl>| {
		let mut host = WorldSceneHost::new(world);

		if spawn {
			match anchor {
				Some(anchor) => match control.0.spawn_batch(&mut host, &anchor, &mut rand::rng()) {
					Ok(batch) => log::info!("Spawned {} markers behind the camera", batch.len()),
					Err(e) => log::error!("Failed to spawn markers: {}", e),
				},
				None => log::warn!("No camera to anchor markers to"),
			}
		}

		if remove {
			if let Err(e) = control.0.remove_batch(&mut host) {
				log::error!("Failed to remove markers: {}", e);
			}
		}

		if reclaim {
			control.0.request_reclaim(&mut host);
		}
	});
}
