//! Resource types and their surroundings for the landscaper service.
//!
//! The types mirror the custom resources the controllers work with
//! (`LandscaperDeployment`, `ServiceTargetConfig`, `TargetScheduling`).
//! Everything here is plain data: scheduling decisions live in
//! `lss-scheduling`.
//!
//! # Components
//!
//! - **`types`**: resource types and the `Selector` expression tree
//! - **`validation`**: admission-style field validation
//! - **`config`**: `lss.toml` controller configuration
//! - **`snapshot`**: an already fetched view of the cluster state

pub mod config;
pub mod error;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use config::{ControllerConfig, SchedulingConfig};
pub use error::{CoreError, CoreResult};
pub use snapshot::ClusterSnapshot;
pub use types::*;
