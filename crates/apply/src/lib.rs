//! Manifest objects and the merge-for-update contract
//!
//! Rendered manifests are handed to an apply step that creates or updates
//! them in the cluster. Before an update, the desired object is merged with
//! the live one so fields owned by the API server survive. This crate holds
//! the object type shared by the renderer and that merge logic.

pub mod error;
pub mod merge;
pub mod object;

pub use error::ApplyError;
pub use merge::{is_object_supported, merge_object_for_update};
pub use object::{ManifestObject, ObjectId};
