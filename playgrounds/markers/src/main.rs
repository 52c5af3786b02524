use bevy::prelude::*;
use markers_playground::{MarkersPlugin, PlaygroundConfig};

fn main() -> anyhow::Result<()> {
	let mut args = std::env::args().skip(1);

	// Parse seed from command line or use default
	let seed = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(12345);
	let config = match args.next() {
		Some(path) => PlaygroundConfig::load(path)?,
		None => PlaygroundConfig::default(),
	};

	println!("Starting markers playground with seed: {} on {}", seed, config.template);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Markers Playground".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(MarkersPlugin { seed, config })
		.run();

	Ok(())
}
