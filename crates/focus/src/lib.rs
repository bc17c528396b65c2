//! Focus mode for anchored documents.
//!
//! Given descriptors (or a serialized descriptor token), [`FocusEngine`]
//! resolves them against a root node and hides everything that is neither a
//! target nor an ancestor of one. Each run of hidden siblings is summarised
//! by one synthetic divider ("2 sections hidden"). Exiting removes every
//! class and divider the engine added, leaving the tree as it found it.
//!
//! ```
//! use focus::{FocusConfig, FocusEngine};
//! use fingerprint::create_descriptor;
//! use tree::{DocTree, MarkableTree};
//!
//! let mut doc = DocTree::new();
//! let root = doc.root();
//! let intro = doc.append_text_element(root, "p", "Intro").unwrap();
//! let target = doc.append_text_element(root, "p", "Keep me").unwrap();
//!
//! let descriptor = create_descriptor(&doc, target, root).unwrap();
//! let mut engine = FocusEngine::new(root, FocusConfig::default()).unwrap();
//! let outcome = engine.apply_descriptors(&mut doc, &[descriptor]);
//!
//! assert_eq!(outcome.hidden, 1);
//! assert!(doc.has_class(intro, "focus-hidden"));
//! engine.exit_focus_mode(&mut doc);
//! assert!(!doc.has_class(intro, "focus-hidden"));
//! ```

mod config;
mod engine;
mod error;

pub use crate::config::FocusConfig;
pub use crate::engine::{divider_label, FocusEngine, FocusOutcome, FocusState};
pub use crate::error::FocusError;
