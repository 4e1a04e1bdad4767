//! Assigns landscaper deployments to service target configs.
//!
//! A pure, synchronous decision engine over data supplied by the caller.
//! It never performs I/O; the caller fetches a consistent snapshot of
//! scheduling rules and target configs beforehand.
//!
//! # Components
//!
//! - **`selector`**: boolean selector evaluation against a deployment
//! - **`rules`**: rule evaluation with priority-wins tie-break
//! - **`scorer`**: load-aware ranking and picking of targets
//! - **`placer`**: the `find_service_target_config` pipeline
//! - **`assignment`**: recording a decision on both sides
//! - **`scheduler`**: repeated scheduling over a cluster snapshot
//!
//! ```text
//! find_service_target_config
//!   ├── evaluate_rules ── evaluate_selector_list
//!   ├── get_unrestricted (no rule matched)
//!   ├── convert_and_filter
//!   └── pick_service_target_config
//! ```

pub mod assignment;
pub mod error;
pub mod placer;
pub mod rules;
pub mod scheduler;
pub mod scorer;
pub mod selector;

pub use assignment::{assign, release};
pub use error::{SchedulingError, SchedulingResult};
pub use placer::{convert_and_filter, find_service_target_config, get_unrestricted};
pub use rules::evaluate_rules;
pub use scheduler::{Assignment, Scheduler};
pub use scorer::{pick_service_target_config, rank_service_target_configs, score, sort_service_target_configs};
pub use selector::{evaluate_selector, evaluate_selector_list};
