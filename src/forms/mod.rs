//! Form state, the submission controller, and the concrete screen flows

mod attachments;
mod controller;
mod form_state;
mod login;
mod vehicle;

pub use attachments::{AttachmentError, StagedFile};
pub use controller::*;
pub use form_state::*;
pub use login::*;
pub use vehicle::*;
