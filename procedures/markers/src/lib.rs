//! Spawns batches of markers on a terrain around a viewer and removes them again.
//!
//! A host implements [`SceneHost`] and hands out terrains whose [`TerrainInstance::storage`]
//! answers height queries. A [`MarkerBatchController`] then drives the whole lifecycle from a
//! [`ViewerAnchor`] sampled from the host's camera.

pub mod anchor;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod session;

#[cfg(test)]
mod testing;

pub use anchor::{CandidateSampler, ViewerAnchor};
pub use config::{BatchConfig, TemplatePath};
pub use controller::{BatchState, Marker, MarkerBatch, MarkerBatchController};
pub use error::{MarkerError, SceneError};
pub use host::{SceneHost, TerrainInstance, HEIGHT_CAPABILITY};
pub use session::TerrainSession;

pub use height_field;
