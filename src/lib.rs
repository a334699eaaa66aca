//! CardioPredict terminal client.
//!
//! Collects a health profile interactively, submits it to the remote
//! CardioPredict prediction service, renders the returned risk
//! classification, and can save a PDF summary report.
//!
//! # Architecture
//!
//! - [`profile`] - the form model and the derived BMI metric
//! - [`client`] - one-shot HTTP prediction client with a discriminated
//!   error taxonomy
//! - [`session`] - reducer-style state machine driving the form/result flow
//! - [`display`] - terminal result view
//! - [`report`] - paginated PDF report formatter

pub mod errors;
pub mod profile;
pub mod client;
pub mod session;
pub mod display;
pub mod report;
pub mod form;
pub mod cli;
pub mod config;

// Re-export commonly used types
pub use client::{PredictionClient, RiskAssessment, RiskCategory};
pub use errors::{PredictError, Result};
pub use profile::{HealthProfile, ProfileDraft};
pub use session::{Phase, Session, SessionEvent};
