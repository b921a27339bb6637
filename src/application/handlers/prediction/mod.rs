//! Prediction handlers (whole-form submission).

mod submit_form;

pub use submit_form::{PredictionError, SubmitFormCommand, SubmitFormHandler, SubmitFormResult};
