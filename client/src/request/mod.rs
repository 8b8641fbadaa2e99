//! Authenticated request pipeline.

mod client;

pub use client::{AuthClient, SessionErrorHandler};
