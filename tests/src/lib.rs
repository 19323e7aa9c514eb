//! Plexus Scenario Test Framework
//!
//! Provides a fluent API for writing end-to-end tests against a Plexus session.
//!
//! # Example
//!
//! ```ignore
//! use plexus_tests::prelude::*;
//!
//! Scenario::new("connect")
//!     .node("A", &[PinDesc::output("P", "exec")])
//!     .node("B", &[PinDesc::input("Q", "exec")])
//!     .step("connect", |fx| fx.connect("A.P", "B.Q"), |a| a.handled().connected("A.P", "B.Q"))
//!     .step("undo", |fx| fx.undo(), |a| a.done().linkless("B.Q"))
//!     .run()
//!     .unwrap();
//! ```

mod assertion;
mod error;
mod fixture;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use fixture::{Fixture, StepOutput};
pub use scenario::{Scenario, SeedNode, Step};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::fixture::{Fixture, StepOutput};
    pub use crate::scenario::Scenario;
    pub use plexus_action::{ActionArgs, ActionOutcome, HistoryConfig, SessionConfig};
    pub use plexus_core::{PinDesc, PinReference};
}
