//! Input sources for gnv.
//!
//! Produces the two sides of a comparison:
//!
//! - [`TelemetryStore`] -- telemetry snapshots keyed by gNMI path (side A)
//! - [`CommandSimulator`] -- renders the command output mapped to a path as
//!   `key: value` text, using the [`CommandLookup`] and [`OutputLookup`]
//!   capabilities (side B)
//! - [`parse_command_output`] -- turns that text back into a mapping
//!
//! [`Catalogue`] is the bundled lookup implementation; any other fixture can
//! be plugged in through the two traits.

pub mod catalogue;
pub mod error;
pub mod output;
pub mod simulator;
pub mod telemetry;
pub mod traits;

pub use catalogue::Catalogue;
pub use error::{SourceError, SourceResult};
pub use output::{parse_command_output, render_command_output};
pub use simulator::{CommandExecution, CommandSimulator};
pub use telemetry::TelemetryStore;
pub use traits::{CommandLookup, CommandSet, OutputLookup};
