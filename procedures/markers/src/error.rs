use crate::config::TemplatePath;
use height_field::HeightQueryFailure;

/// Failure reported by a scene host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
	#[error("template `{template}` could not be resolved: {reason}")]
	UnresolvedTemplate { template: String, reason: String },
	#[error("object {0} is not in the scene")]
	MissingObject(String),
	#[error("scene host rejected the request: {0}")]
	Rejected(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkerError {
	#[error("failed to load terrain template `{template}`: {source}")]
	AssetLoad {
		template: TemplatePath,
		#[source]
		source: SceneError,
	},
	#[error("terrain template `{template}` does not expose a `{capability}` height query")]
	CapabilityMissing { template: TemplatePath, capability: &'static str },
	#[error("terrain session is not active")]
	SessionInactive,
	#[error("a marker batch is already spawned")]
	AlreadySpawned,
	#[error("there is no marker batch to remove")]
	NothingToRemove,
	#[error("height query at ({x}, {z}) failed: {source}")]
	HeightQuery {
		x: f32,
		z: f32,
		#[source]
		source: HeightQueryFailure,
	},
	#[error(transparent)]
	Scene(#[from] SceneError),
	#[error("{} of {attempted} teardown requests failed", .failures.len())]
	Teardown { attempted: usize, failures: Vec<MarkerError> },
	#[error("spawn failed and {} rollback requests failed too: {cause}", .failures.len())]
	RollbackIncomplete {
		#[source]
		cause: Box<MarkerError>,
		failures: Vec<MarkerError>,
	},
	#[error("invalid marker configuration: {0}")]
	InvalidConfig(String),
}
