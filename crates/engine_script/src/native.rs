//! In-process script runtime.
//!
//! [`NativeRuntime`] hosts "script classes" written in Rust. A class is a
//! factory for [`ScriptObject`]s plus the list of methods it exposes, so
//! method resolution works before any object exists, just as it does for a
//! foreign runtime.

use std::collections::HashMap;

use tracing::trace;

use crate::api::EngineApi;
use crate::error::ScriptError;
use crate::runtime::{
    ClassRef, MethodRef, MethodSig, ObjectRef, Receiver, ReturnKind, ScriptRuntime, ScriptValue,
};

/// An object created by a [`NativeClass`].
pub trait ScriptObject {
    /// Run the instance method `method`.
    ///
    /// # Errors
    ///
    /// Any error is reported to the engine as a script exception.
    fn call(&mut self, method: &str, api: &mut dyn EngineApi) -> anyhow::Result<()>;
}

type Factory = Box<dyn Fn() -> Box<dyn ScriptObject>>;
type StaticFn = Box<dyn Fn(&mut dyn EngineApi) -> anyhow::Result<ScriptValue>>;

struct StaticMethod {
    name: String,
    returns: ReturnKind,
    body: StaticFn,
}

/// A class definition for the [`NativeRuntime`].
pub struct NativeClass {
    factory: Option<Factory>,
    methods: Vec<String>,
    statics: Vec<StaticMethod>,
}

impl NativeClass {
    /// A class whose objects are built by `factory`.
    pub fn new<O: ScriptObject + 'static>(factory: impl Fn() -> O + 'static) -> Self {
        Self {
            factory: Some(Box::new(move || Box::new(factory()) as Box<dyn ScriptObject>)),
            methods: Vec::new(),
            statics: Vec::new(),
        }
    }

    /// A class with no constructor and no methods.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factory: None,
            methods: Vec::new(),
            statics: Vec::new(),
        }
    }

    /// Expose the instance method `void name()`.
    #[must_use]
    pub fn method(mut self, name: &str) -> Self {
        self.methods.push(name.to_string());
        self
    }

    /// Expose `static boolean name()`.
    #[must_use]
    pub fn static_bool(
        mut self,
        name: &str,
        body: impl Fn(&mut dyn EngineApi) -> anyhow::Result<bool> + 'static,
    ) -> Self {
        self.statics.push(StaticMethod {
            name: name.to_string(),
            returns: ReturnKind::Bool,
            body: Box::new(move |api| body(api).map(ScriptValue::Bool)),
        });
        self
    }

    /// Expose `static void name()`.
    #[must_use]
    pub fn static_void(
        mut self,
        name: &str,
        body: impl Fn(&mut dyn EngineApi) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.statics.push(StaticMethod {
            name: name.to_string(),
            returns: ReturnKind::Void,
            body: Box::new(move |api| body(api).map(|()| ScriptValue::Void)),
        });
        self
    }
}

enum Resolved {
    Instance { class: ClassRef, name: String },
    Static { class: ClassRef, index: usize },
}

/// A [`ScriptRuntime`] backed by Rust closures.
#[derive(Default)]
pub struct NativeRuntime {
    classes: Vec<(String, NativeClass)>,
    by_path: HashMap<String, ClassRef>,
    methods: Vec<Resolved>,
    objects: HashMap<ObjectRef, (ClassRef, Box<dyn ScriptObject>)>,
    next_object: u64,
}

impl NativeRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a class at `path`, replacing any earlier definition.
    pub fn register(&mut self, path: &str, class: NativeClass) -> ClassRef {
        let class_ref = ClassRef(self.classes.len() as u64 + 1);
        self.classes.push((path.to_string(), class));
        self.by_path.insert(path.to_string(), class_ref);
        class_ref
    }

    /// Number of objects created and not yet released.
    #[must_use]
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    fn class(&self, class: ClassRef) -> Result<&(String, NativeClass), ScriptError> {
        usize::try_from(class.0)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.classes.get(i))
            .ok_or_else(|| ScriptError::stale_class(class))
    }
}

impl ScriptRuntime for NativeRuntime {
    fn resolve_class(&mut self, path: &str) -> Result<ClassRef, ScriptError> {
        self.by_path
            .get(path)
            .copied()
            .ok_or_else(|| ScriptError::ClassNotFound(path.to_string()))
    }

    fn resolve_method(&mut self, class: ClassRef, sig: &MethodSig<'_>) -> Result<MethodRef, ScriptError> {
        let (path, def) = self.class(class)?;
        let not_found = || ScriptError::MethodNotFound {
            class: path.clone(),
            name: sig.name.to_string(),
        };

        let resolved = if sig.is_static {
            let index = def
                .statics
                .iter()
                .position(|m| m.name == sig.name && m.returns == sig.returns)
                .ok_or_else(not_found)?;
            Resolved::Static { class, index }
        } else {
            if sig.returns != ReturnKind::Void || !def.methods.iter().any(|m| m == sig.name) {
                return Err(not_found());
            }
            Resolved::Instance {
                class,
                name: sig.name.to_string(),
            }
        };

        self.methods.push(resolved);
        Ok(MethodRef(self.methods.len() as u64))
    }

    fn instantiate(&mut self, class: ClassRef) -> Result<ObjectRef, ScriptError> {
        let (path, def) = self.class(class)?;
        let factory = def
            .factory
            .as_ref()
            .ok_or_else(|| ScriptError::Exception(format!("{path} has no constructor")))?;
        let object = factory();

        self.next_object += 1;
        let object_ref = ObjectRef(self.next_object);
        self.objects.insert(object_ref, (class, object));
        trace!(object = object_ref.0, class = class.0, "script object created");
        Ok(object_ref)
    }

    fn invoke(
        &mut self,
        receiver: Receiver,
        method: MethodRef,
        api: &mut dyn EngineApi,
    ) -> Result<ScriptValue, ScriptError> {
        let resolved = usize::try_from(method.0)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.methods.get(i))
            .ok_or_else(|| ScriptError::stale_method(method))?;

        match (receiver, resolved) {
            (Receiver::Object(object), Resolved::Instance { class, name }) => {
                let (object_class, target) = self
                    .objects
                    .get_mut(&object)
                    .ok_or_else(|| ScriptError::stale_object(object))?;
                if object_class != class {
                    return Err(ScriptError::stale_method(method));
                }
                target
                    .call(name, api)
                    .map_err(|err| ScriptError::Exception(format!("{err:#}")))?;
                Ok(ScriptValue::Void)
            }
            (Receiver::Static(target), Resolved::Static { class, index }) if target == *class => {
                let (_, def) = self.class(*class)?;
                let body = &def.statics[*index].body;
                body(api).map_err(|err| ScriptError::Exception(format!("{err:#}")))
            }
            _ => Err(ScriptError::stale_method(method)),
        }
    }

    fn release(&mut self, object: ObjectRef) {
        if self.objects.remove(&object).is_some() {
            trace!(object = object.0, "script object released");
        }
    }
}
