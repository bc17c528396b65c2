//! URL trigger tokens.
//!
//! A link like `https://docs.example/guide?share-section` asks the page to
//! start a share flow. [`detect_action`] finds such a token (query before
//! fragment), [`cleaned_url`] strips it, and [`ActionRouter`] ties the two
//! together: detect, replace the URL with the cleaned one, then call the
//! registered handler.

mod action;
mod service;

pub use crate::action::{cleaned_url, detect_action, ActionKind, SelectionMode, UrlAction, VOCABULARY};
pub use crate::service::ActionRouter;
pub use history::query::UrlPart;
