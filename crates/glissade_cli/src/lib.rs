//! Glissade scenario runner
//!
//! Runs JSON scenarios against a keyed list in the headless host and
//! reports what the FLIP engine did:
//!
//! ```json
//! {
//!   "items": [{ "id": "a" }, { "id": "b" }],
//!   "steps": [
//!     { "type": "read" },
//!     { "type": "move", "id": "b", "index": 0 },
//!     { "type": "play" },
//!     { "type": "assert_animation", "id": "a", "start": "transform: translate(0px, -40px)" }
//!   ]
//! }
//! ```

pub mod assert;
pub mod config;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::GlissadeConfig;
pub use report::{AnimationEntry, ReportStatus, ScenarioReport};
pub use runner::{run_loaded_scenario, run_scenario, RunOutcome, ScenarioRunner};
pub use scenario::{Scenario, ScenarioStep};
