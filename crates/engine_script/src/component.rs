//! The script component.
//!
//! One component type is registered per script class. Its prototype holds the
//! resolved class and method handles; every instance cloned from it starts
//! without a foreign object and creates one on its first `start`.

use std::rc::Rc;

use anyhow::Context as _;
use engine_component::{Component, Context};
use tracing::warn;

use crate::error::ScriptError;
use crate::runtime::{ClassRef, MethodRef, MethodSig, ObjectRef, Receiver, ScriptHost, ScriptRuntime};

/// A component backed by a foreign object.
#[derive(Debug, Clone)]
pub struct ScriptComponent {
    path: Rc<str>,
    class: ClassRef,
    object: Option<ObjectRef>,
    start: Option<MethodRef>,
    update: Option<MethodRef>,
    destroy: Option<MethodRef>,
}

impl ScriptComponent {
    /// Resolve the class at `path` and its `start`/`update`/`destroy` methods.
    ///
    /// Missing methods are not errors: the matching callback does nothing.
    ///
    /// # Errors
    ///
    /// Fails if the class itself cannot be resolved.
    pub fn resolve(runtime: &mut dyn ScriptRuntime, path: &str) -> Result<Self, ScriptError> {
        let class = runtime.resolve_class(path)?;
        let mut method = |name: &str| match runtime.resolve_method(class, &MethodSig::instance(name)) {
            Ok(method) => Some(method),
            Err(err) => {
                warn!(
                    class = path,
                    method = name,
                    error = %err,
                    "script method not resolved, callback disabled"
                );
                None
            }
        };
        let start = method("start");
        let update = method("update");
        let destroy = method("destroy");

        Ok(Self {
            path: Rc::from(path),
            class,
            object: None,
            start,
            update,
            destroy,
        })
    }

    /// The class path this component was resolved from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The foreign object, once created.
    #[must_use]
    pub fn object(&self) -> Option<ObjectRef> {
        self.object
    }

    /// Returns `true` if none of the lifecycle methods resolved.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.start.is_none() && self.update.is_none() && self.destroy.is_none()
    }

    fn call(&self, method: Option<MethodRef>, name: &str, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let (Some(method), Some(object)) = (method, self.object) else {
            return Ok(());
        };
        let host = cx.require::<ScriptHost>()?.clone();
        let mut runtime = host.runtime()?;
        runtime
            .invoke(Receiver::Object(object), method, cx)
            .with_context(|| format!("{}::{name}", self.path))?;
        Ok(())
    }
}

impl Component for ScriptComponent {
    fn start(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        if self.is_inert() {
            return Ok(());
        }
        if self.object.is_none() {
            let host = cx.require::<ScriptHost>()?.clone();
            let object = host
                .runtime()?
                .instantiate(self.class)
                .with_context(|| format!("instantiating {}", self.path))?;
            self.object = Some(object);
        }
        self.call(self.start, "start", cx)
    }

    fn update(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        self.call(self.update, "update", cx)
    }

    fn destroy(&mut self, cx: &mut Context<'_>) -> anyhow::Result<()> {
        let result = self.call(self.destroy, "destroy", cx);
        if let Some(object) = self.object.take() {
            let host = cx.require::<ScriptHost>()?.clone();
            host.runtime()?.release(object);
        }
        result
    }
}
