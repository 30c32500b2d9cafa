//! Tracing targets for the sectioned adapter.
//!
//! The crate logs through `tracing`. Install a subscriber in the host
//! application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_sections=debug")
//!     .init();
//! ```
//!
//! Contract violations are logged at `error`, suspicious bindings at `warn`,
//! structural edits at `debug` and per-item creation and binding at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Position translation and item dispatch.
    pub const ADAPTER: &str = "horizon_lattice_sections::adapter";
    /// Structural edits to the section list.
    pub const STRUCTURE: &str = "horizon_lattice_sections::structure";
    /// The vector-backed section.
    pub const LIST_SECTION: &str = "horizon_lattice_sections::list_section";
}
