//! Survey submission block: composes the atoms into the end-to-end
//! submission pipeline and exposes it over HTTP handlers.

pub mod alerts;
pub mod handlers;
pub mod pipeline;
pub mod types;

pub use alerts::{alert_for_error, Alert, AlertSink, CollectedAlerts};
pub use pipeline::{submit, Collaborators};
