//! # Anchor Fingerprint Engine (`fingerprint`)
//!
//! ## Purpose
//!
//! A rendered node has no identity that survives a reload, a re-render or a
//! content edit. This crate manufactures one at capture time (an
//! [`AnchorDescriptor`]) and later finds the best surviving node for it with a
//! scored candidate search.
//!
//! ## Core Types
//!
//! - [`AnchorDescriptor`]: tag, same-tag sibling index, nearest ancestor `id`,
//!   text snippet and text hash. Plain data, serde-friendly.
//! - [`ScoringPolicy`]: per-signal weights plus the acceptance threshold.
//! - [`Resolver`]: runs the candidate search under a policy.
//! - [`CandidateScore`]: per-signal breakdown of one candidate.
//!
//! ## Resolution in one paragraph
//!
//! Candidates are all elements with the descriptor's tag inside the scope
//! named by `parentId` (or the whole root when that id is gone). Each earns
//! 10 for index agreement, 50 for an identical text hash and 30 when its text
//! starts with the snippet. The best total wins, earlier nodes win ties, and
//! anything at or below 30 is rejected, so index agreement alone never
//! resolves.
//!
//! ## Example
//!
//! ```
//! use fingerprint::{create_descriptor, deserialize, resolve, serialize};
//! use tree::DocTree;
//!
//! let mut doc = DocTree::new();
//! let root = doc.root();
//! let list = doc.append_element_with_id(root, "ul", "features").unwrap();
//! let item = doc.append_text_element(list, "li", "Feature A").unwrap();
//!
//! let descriptor = create_descriptor(&doc, item, root).unwrap();
//! let token = serialize(std::slice::from_ref(&descriptor));
//!
//! let restored = deserialize(&token);
//! assert_eq!(resolve(&doc, root, &restored[0]), Some(item));
//! ```
//!
//! ## Failure semantics
//!
//! Nothing here panics on bad input. A miss is `None`, a corrupt token is an
//! empty list. The `try_*` variants expose typed errors for logging.

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod policy;
pub mod resolver;

pub use crate::codec::{deserialize, serialize, try_deserialize, try_serialize};
pub use crate::descriptor::{create_descriptor, create_descriptors, fingerprint_token, AnchorDescriptor};
pub use crate::error::{CodecError, FingerprintError};
pub use crate::policy::ScoringPolicy;
pub use crate::resolver::{resolve, resolve_all, resolve_token, CandidateScore, Resolver};
