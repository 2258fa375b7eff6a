//! Submission transport: request/result types, the mockable API trait,
//! and the reqwest-backed client

mod client;
mod traits;
mod types;

pub use client::*;
pub use traits::*;
pub use types::*;
