//! Churn Intake - guided customer-attribute collection with churn scoring
//!
//! Collects a fixed set of customer attributes one field at a time over
//! chat, or all at once from a web form, and asks an external model how
//! likely the customer is to leave.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
