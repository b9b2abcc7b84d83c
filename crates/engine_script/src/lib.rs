//! # engine_script
//!
//! Lets script classes hosted by an external runtime take part in the
//! component lifecycle.
//!
//! The engine does not embed a language. Anything implementing
//! [`ScriptRuntime`] can be plugged in; [`NativeRuntime`] is an in-process
//! runtime whose classes are Rust closures.
//!
//! ## Loading
//!
//! [`load_scripts`] reads a [`ScriptManifest`]:
//!
//! 1. The `"scripts"` system is registered (or reused) and the runtime is
//!    installed as the [`ScriptHost`] resource. A world holds at most one
//!    runtime; loading again while one is installed fails.
//! 2. Every class path becomes a component type of the same name, backed by
//!    [`ScriptComponent`]. Classes that do not resolve are logged and skipped.
//! 3. If a static class is named, its `static boolean init()` runs right away
//!    and its `static void deinit()` is registered as a world shutdown hook.
//!
//! Script code reaches back into the engine through [`EngineApi`].

pub mod api;
pub mod component;
pub mod error;
pub mod manifest;
pub mod native;
pub mod runtime;
pub mod system;

use std::path::Path;

use engine_app::World;
use engine_component::{ComponentTypeId, EcsError, SystemId};
use engine_system::SystemConfig;
use tracing::{debug, error, info, warn};

pub use api::{EngineApi, Severity};
pub use component::ScriptComponent;
pub use error::ScriptError;
pub use manifest::{ScriptManifest, ScriptSection};
pub use native::{NativeClass, NativeRuntime, ScriptObject};
pub use runtime::{
    ClassRef, MethodRef, MethodSig, ObjectRef, Receiver, ReturnKind, ScriptHost, ScriptRuntime,
    ScriptValue,
};
pub use system::{SCRIPT_SYSTEM, ScriptSystem};

/// Outcome of [`load_scripts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Component types registered, in manifest order.
    pub types: Vec<ComponentTypeId>,
    /// Class paths that could not be registered.
    pub failed: Vec<String>,
    /// The static class whose `init()` ran, if any.
    pub static_class: Option<String>,
}

/// Install `runtime` and register the classes named by `manifest`.
///
/// # Errors
///
/// [`ScriptError::AlreadyLoaded`] if a runtime is already installed,
/// [`ScriptError::InitFailed`] if the static `init()` returns `false`, the
/// script error if it raises, or an ECS error if the scripts system cannot be
/// registered. Per-class failures are reported in [`LoadReport::failed`].
pub fn load_scripts(
    world: &mut World,
    runtime: impl ScriptRuntime + 'static,
    manifest: &ScriptManifest,
) -> Result<LoadReport, ScriptError> {
    if world.resource::<ScriptHost>().is_some() {
        warn!("script runtime already installed, load rejected");
        return Err(ScriptError::AlreadyLoaded);
    }
    let system = script_system(world)?;
    let host = ScriptHost::new(runtime);
    world.insert_resource(host.clone());

    let mut report = LoadReport::default();
    for path in &manifest.scripts.classpaths {
        let registered = ScriptComponent::resolve(&mut *host.runtime()?, path)
            .and_then(|proto| Ok(world.construct_type_for(path, proto, system)?));
        match registered {
            Ok(id) => {
                debug!(class = %path, type_id = %id, "script component registered");
                report.types.push(id);
            }
            Err(err) => {
                error!(class = %path, error = %err, "script component not registered");
                report.failed.push(path.clone());
            }
        }
    }

    if let Some(class) = &manifest.scripts.static_class {
        if run_static_hooks(world, &host, class)? {
            report.static_class = Some(class.clone());
        }
    }

    world.flush_commands();
    info!(
        types = report.types.len(),
        failed = report.failed.len(),
        static_class = report.static_class.as_deref(),
        "scripts loaded"
    );
    Ok(report)
}

/// [`load_scripts`] from a manifest file. A missing file loads nothing and
/// returns `Ok(None)`.
///
/// # Errors
///
/// Manifest read and parse errors, then see [`load_scripts`].
pub fn load_from_path(
    world: &mut World,
    runtime: impl ScriptRuntime + 'static,
    path: impl AsRef<Path>,
) -> Result<Option<LoadReport>, ScriptError> {
    let path = path.as_ref();
    match ScriptManifest::load(path)? {
        Some(manifest) => load_scripts(world, runtime, &manifest).map(Some),
        None => {
            info!(path = %path.display(), "no script manifest, scripting disabled");
            Ok(None)
        }
    }
}

fn script_system(world: &mut World) -> Result<SystemId, EcsError> {
    let config = SystemConfig::new(SCRIPT_SYSTEM);
    let id = config.id();
    match world.construct_system(config, ScriptSystem) {
        Err(EcsError::NameCollision(_)) if world.system(id).is_some() => {
            debug!("scripts system already registered");
            Ok(id)
        }
        other => other,
    }
}

/// Run `init()` on the static class and schedule `deinit()` for shutdown.
/// Returns `false` if the class or its `init()` could not be resolved.
fn run_static_hooks(world: &mut World, host: &ScriptHost, path: &str) -> Result<bool, ScriptError> {
    let class = match host.runtime()?.resolve_class(path) {
        Ok(class) => class,
        Err(err) => {
            warn!(class = path, error = %err, "static script class not resolved");
            return Ok(false);
        }
    };

    let init = host.runtime()?.resolve_method(class, &MethodSig::static_bool("init"));
    let ran = match init {
        Ok(init) => {
            let value = host.runtime()?.invoke(Receiver::Static(class), init, &mut *world)?;
            if value == ScriptValue::Bool(false) {
                return Err(ScriptError::InitFailed(path.to_string()));
            }
            true
        }
        Err(err) => {
            warn!(class = path, error = %err, "static init() not found");
            false
        }
    };

    match host.runtime()?.resolve_method(class, &MethodSig::static_void("deinit")) {
        Ok(deinit) => {
            let host = host.clone();
            let path = path.to_string();
            world.add_shutdown_hook(move |world| {
                let result = host
                    .runtime()
                    .and_then(|mut runtime| runtime.invoke(Receiver::Static(class), deinit, world));
                if let Err(err) = result {
                    error!(class = %path, error = %err, "static deinit() failed");
                }
            });
        }
        Err(err) => warn!(class = path, error = %err, "static deinit() not found"),
    }
    Ok(ran)
}
