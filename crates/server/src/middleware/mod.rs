//! # HTTP Middleware
//!
//! Identity gates for the three account kinds and request id propagation.

pub mod identity;
pub mod request_id;

pub use identity::{require_admin, require_employer, require_student, AuthenticatedAdmin, AuthenticatedEmployer, AuthenticatedStudent};
pub use request_id::request_id_middleware;
