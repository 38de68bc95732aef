//! Reflection providers — where class descriptors come from.

pub mod json;

use crate::model::ClassDescriptor;
use std::path::PathBuf;
use thiserror::Error;

pub use json::JsonReflection;

#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("class not found: {0}")]
    NotFound(String),

    #[error("failed to read reflection dump {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reflection dump {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("class entry without a name in {0}")]
    MissingName(PathBuf),
}

/// Source of reflected class metadata.
pub trait ReflectionProvider {
    /// Every known class name, in provider order.
    fn class_names(&self) -> Vec<&str>;

    /// Look a class up by fully-qualified name; a leading `\` is accepted.
    fn get_class(&self, name: &str) -> Result<&ClassDescriptor, ReflectionError>;
}
