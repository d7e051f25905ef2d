//! lopdf backend for AcroForm field extraction and patching.
//!
//! This crate implements [`FormBackend`] on top of lopdf. It walks page
//! annotations to describe widgets, applies patch batches to the live
//! object graph, creates new widgets and regenerates appearance streams.

mod appearance;
mod apply;
pub mod backend;
mod create;
pub mod error;
mod extract;
pub mod lopdf_backend;
mod objects;
#[cfg(test)]
mod test_fixtures;
pub mod text_string;

pub use acroform_core;
pub use backend::FormBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
