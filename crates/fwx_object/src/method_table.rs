//! Method tables: the callable surface of types and instances.
//!
//! A [`MethodTable`] maps a method name to a [`Method`]. Types own two of
//! them (instance methods and type-level methods) and every instance owns
//! one for methods defined on that instance alone. Tables are mutable
//! through a shared reference so methods can be installed after a type has
//! been handed out.

use std::fmt;
use std::sync::Arc;

use fwx_ir::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::wrong_arg_count;
use crate::{EvalResult, ProcValue, Value};

/// Body of a method: `self`, the arguments, and the optional trailing block.
pub type MethodBody = dyn Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync;

/// Number of arguments a method accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Variadic with a required prefix.
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, argc: usize) -> bool {
        match self {
            Arity::Exact(n) => argc == n,
            Arity::AtLeast(n) => argc >= n,
        }
    }

    /// Fewest arguments accepted.
    pub fn min(self) -> usize {
        match self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
        }
    }
}

/// A named callable installed in a method table.
#[derive(Clone)]
pub struct Method {
    name: Name,
    arity: Arity,
    body: Arc<MethodBody>,
}

impl Method {
    pub fn new<F>(name: impl Into<Name>, arity: Arity, body: F) -> Self
    where
        F: Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync + 'static,
    {
        Method {
            name: name.into(),
            arity,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Run the body after checking the argument count.
    pub fn invoke(
        &self,
        self_value: &Value,
        args: &[Value],
        block: Option<&ProcValue>,
    ) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(wrong_arg_count(
                self.name.as_str(),
                self.arity.min(),
                args.len(),
            ));
        }
        (self.body)(self_value, args, block)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name-keyed method storage with interior mutability.
///
/// Defining a name that already exists replaces the previous method
/// (last write wins).
#[derive(Default)]
pub struct MethodTable {
    methods: RwLock<FxHashMap<Name, Method>>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `method` under its own name, returning the method it replaced.
    pub fn define(&self, method: Method) -> Option<Method> {
        self.methods.write().insert(method.name(), method)
    }

    /// Look up a method.
    ///
    /// Returns a clone so the lock is released before the method runs; a
    /// method body is free to define further methods on the same table.
    pub fn lookup(&self, name: Name) -> Option<Method> {
        self.methods.read().get(&name).cloned()
    }

    pub fn contains(&self, name: Name) -> bool {
        self.methods.read().contains_key(&name)
    }

    pub fn remove(&self, name: Name) -> Option<Method> {
        self.methods.write().remove(&name)
    }

    /// Defined names, sorted alphabetically.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.methods.read().keys().copied().collect();
        names.sort_by_key(|name| name.as_str());
        names
    }

    pub fn len(&self) -> usize {
        self.methods.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.read().is_empty()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
