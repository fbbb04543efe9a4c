pub mod handoff;
pub mod format;
pub mod receipt;
pub mod view;

pub use handoff::{ConfirmationHandoff, HandoffError};
pub use receipt::render_receipt;
pub use view::ConfirmationView;

#[cfg(test)]
pub(crate) mod fixtures;
