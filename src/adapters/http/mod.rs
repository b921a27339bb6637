//! HTTP adapters - REST API and web form.
//!
//! Each area has its own HTTP adapter for endpoint exposure.

pub mod error;
pub mod form;
pub mod intake;
mod router;

pub use error::{status_for, ErrorResponse, FieldValue};
pub use form::{form_routes, FormHandlers};
pub use intake::{intake_routes, IntakeHandlers};
pub use router::{app_router, HttpSettings};
