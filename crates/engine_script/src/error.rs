//! Scripting error types.

use std::path::PathBuf;

use engine_component::EcsError;

use crate::runtime::{ClassRef, MethodRef, ObjectRef};

/// Errors raised by the scripting bridge and by script runtimes.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The runtime has no class at this path.
    #[error("class '{0}' not found")]
    ClassNotFound(String),

    /// The class has no method with this name and signature.
    #[error("method '{name}' not found on class {class}")]
    MethodNotFound { class: String, name: String },

    /// The handle does not name a live class, method or object.
    #[error("stale script handle: {0}")]
    StaleHandle(String),

    /// Script code failed while running.
    #[error("script raised: {0}")]
    Exception(String),

    /// A script call was made while another one was still running on the
    /// same runtime.
    #[error("script runtime is already running a call")]
    RuntimeBusy,

    /// A runtime is already installed. Handles resolved against it are only
    /// valid for that runtime, so it cannot be replaced.
    #[error("a script runtime is already installed")]
    AlreadyLoaded,

    /// No script runtime resource is installed.
    #[error("no script runtime installed")]
    NoRuntime,

    #[error("failed to read script manifest {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The static `init()` hook returned `false`.
    #[error("{0}::init reported failure")]
    InitFailed(String),

    #[error(transparent)]
    Ecs(#[from] EcsError),
}

impl ScriptError {
    pub(crate) fn stale_class(class: ClassRef) -> Self {
        Self::StaleHandle(format!("class {}", class.0))
    }

    pub(crate) fn stale_method(method: MethodRef) -> Self {
        Self::StaleHandle(format!("method {}", method.0))
    }

    pub(crate) fn stale_object(object: ObjectRef) -> Self {
        Self::StaleHandle(format!("object {}", object.0))
    }
}
