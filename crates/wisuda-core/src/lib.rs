//! Core types and the normalization pipeline for graduation participant
//! exports.
//!
//! This crate is free of spreadsheet and database dependencies. Readers
//! produce a [`Sheet`](ingest::Sheet), [`ingest::prepare`] turns it into a
//! [`Batch`](record::Batch), and a [`ParticipantStore`](store::ParticipantStore)
//! persists it.

pub mod coerce;
pub mod column;
pub mod error;
pub mod ingest;
pub mod period;
pub mod record;
pub mod store;
pub mod value;

pub use error::{Error, Result};
