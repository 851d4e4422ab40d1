//! Detection pipeline: authorization resolution, cooldown gating, and
//! trigger orchestration.

pub mod errors;
pub mod models;
pub mod resolver;
pub mod service;

pub use errors::DetectionError;
pub use service::*;
