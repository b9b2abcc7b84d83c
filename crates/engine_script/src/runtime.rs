//! The script runtime capability.
//!
//! The engine does not embed a language. A [`ScriptRuntime`] is anything that
//! can resolve classes and methods by name, create objects and invoke
//! zero-argument methods on them. Handles are opaque to the engine.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::api::EngineApi;
use crate::error::ScriptError;

/// A resolved class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassRef(pub u64);

/// A resolved method of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRef(pub u64);

/// A live foreign object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(pub u64);

/// What a method returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Bool,
}

/// Name and shape of a zero-argument method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSig<'a> {
    pub name: &'a str,
    pub is_static: bool,
    pub returns: ReturnKind,
}

impl<'a> MethodSig<'a> {
    /// `void name()` on an instance.
    #[must_use]
    pub const fn instance(name: &'a str) -> Self {
        Self {
            name,
            is_static: false,
            returns: ReturnKind::Void,
        }
    }

    /// `static void name()`.
    #[must_use]
    pub const fn static_void(name: &'a str) -> Self {
        Self {
            name,
            is_static: true,
            returns: ReturnKind::Void,
        }
    }

    /// `static boolean name()`.
    #[must_use]
    pub const fn static_bool(name: &'a str) -> Self {
        Self {
            name,
            is_static: true,
            returns: ReturnKind::Bool,
        }
    }
}

/// A value returned by a script method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptValue {
    Void,
    Bool(bool),
}

/// What a method is invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Object(ObjectRef),
    Static(ClassRef),
}

/// A scripting runtime.
pub trait ScriptRuntime {
    /// Look up a class by path.
    ///
    /// # Errors
    ///
    /// [`ScriptError::ClassNotFound`] if there is no such class.
    fn resolve_class(&mut self, path: &str) -> Result<ClassRef, ScriptError>;

    /// Look up a method of `class` matching `sig`.
    ///
    /// # Errors
    ///
    /// [`ScriptError::MethodNotFound`] if no method matches.
    fn resolve_method(&mut self, class: ClassRef, sig: &MethodSig<'_>) -> Result<MethodRef, ScriptError>;

    /// Create an object of `class` with its no-argument constructor.
    ///
    /// # Errors
    ///
    /// Fails for stale classes or if construction raises.
    fn instantiate(&mut self, class: ClassRef) -> Result<ObjectRef, ScriptError>;

    /// Invoke a resolved method. Script code reaches the engine through
    /// `api` for the duration of the call.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Exception`] if the script raised.
    fn invoke(
        &mut self,
        receiver: Receiver,
        method: MethodRef,
        api: &mut dyn EngineApi,
    ) -> Result<ScriptValue, ScriptError>;

    /// Drop a foreign object.
    fn release(&mut self, object: ObjectRef);
}

/// The world resource holding the active runtime.
///
/// Cloning shares the runtime. Callers clone the handle out of the resource
/// map before borrowing it, so the world stays free to hand to the script as
/// its [`EngineApi`].
#[derive(Clone)]
pub struct ScriptHost(Rc<RefCell<dyn ScriptRuntime>>);

impl ScriptHost {
    pub fn new(runtime: impl ScriptRuntime + 'static) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    /// Exclusive access to the runtime.
    ///
    /// # Errors
    ///
    /// [`ScriptError::RuntimeBusy`] if a call is already in progress.
    pub fn runtime(&self) -> Result<RefMut<'_, dyn ScriptRuntime + 'static>, ScriptError> {
        self.0.try_borrow_mut().map_err(|_| ScriptError::RuntimeBusy)
    }
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScriptHost")
    }
}
