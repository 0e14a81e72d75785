//! Apply errors

use thiserror::Error;

use crate::object::ObjectId;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("manifest is a {0}, not a mapping")]
    NotAnObject(&'static str),

    #[error("object is missing {0}")]
    MissingField(&'static str),

    #[error("unsupported object {id}: {reason}")]
    Unsupported { id: ObjectId, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}
