//! Logging facilities.
//!
//! Gossamer instruments its subsystems with the `tracing` crate. To see the
//! output, install a subscriber in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The constants in [`targets`] can be used with `tracing` filter directives
//! to enable a single subsystem, e.g.
//! `RUST_LOG=gossamer::solver=trace,gossamer::input=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Anchor constraint solver.
    pub const SOLVER: &str = "gossamer::solver";
    /// Z-order / strata management.
    pub const STRATA: &str = "gossamer::strata";
    /// Input routing (hit tests, clicks, drags, keys).
    pub const INPUT: &str = "gossamer::input";
    /// Script handler dispatch.
    pub const SCRIPT: &str = "gossamer::script";
    /// Region lifecycle and hierarchy edits.
    pub const REGION: &str = "gossamer::region";
}
