//! HTTP adapter for the web form and whole-record predictions.

mod dto;
mod handlers;
mod page;
mod routes;

pub use dto::{PredictionRequest, PredictionResponse};
pub use handlers::FormHandlers;
pub use page::{render_page, PageOutcome};
pub use routes::form_routes;
