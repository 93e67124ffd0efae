//! Types and instances.
//!
//! A [`TypeRef`] owns two method tables: instance methods, shared by every
//! instance of the type and its subtypes, and type-level methods, sent to
//! the type itself. An [`ObjectRef`] carries a field store and a table of
//! methods defined on that one instance. Lookup walks from the most
//! specific table outwards:
//!
//! ```text
//! instance: own table -> type -> supertype -> ...
//! type:     type-level table -> supertype's type-level table -> ...
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fwx_ir::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::method_table::{Arity, Method, MethodTable};
use crate::{EvalResult, ProcValue, Value};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

fn next_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Type descriptor.
pub struct TypeObject {
    id: u64,
    name: Name,
    superclass: Option<TypeRef>,
    methods: MethodTable,
    type_methods: MethodTable,
}

/// Shared handle to a type.
#[derive(Clone)]
pub struct TypeRef(Arc<TypeObject>);

impl TypeRef {
    /// Create a root type.
    pub fn new(name: impl Into<Name>) -> Self {
        Self::with_superclass(name, None)
    }

    pub fn with_superclass(name: impl Into<Name>, superclass: Option<TypeRef>) -> Self {
        TypeRef(Arc::new(TypeObject {
            id: next_object_id(),
            name: name.into(),
            superclass,
            methods: MethodTable::new(),
            type_methods: MethodTable::new(),
        }))
    }

    /// Create a subtype inheriting both method tables of `self`.
    pub fn subclass(&self, name: impl Into<Name>) -> TypeRef {
        Self::with_superclass(name, Some(self.clone()))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> Name {
        self.0.name
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.0.superclass.as_ref()
    }

    /// Instance methods declared directly on this type.
    pub fn methods(&self) -> &MethodTable {
        &self.0.methods
    }

    /// Type-level methods declared directly on this type.
    pub fn type_methods(&self) -> &MethodTable {
        &self.0.type_methods
    }

    /// Define an instance method.
    pub fn define_method<F>(&self, name: impl Into<Name>, arity: Arity, body: F) -> &Self
    where
        F: Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync + 'static,
    {
        self.0.methods.define(Method::new(name, arity, body));
        self
    }

    /// Define a type-level method (`self` is the type when it runs).
    pub fn define_type_method<F>(&self, name: impl Into<Name>, arity: Arity, body: F) -> &Self
    where
        F: Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync + 'static,
    {
        self.0.type_methods.define(Method::new(name, arity, body));
        self
    }

    /// This type followed by its supertypes, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Resolve an instance method along the ancestor chain.
    pub fn find_method(&self, name: Name) -> Option<Method> {
        self.ancestors().find_map(|ty| ty.methods().lookup(name))
    }

    /// Resolve a type-level method along the ancestor chain.
    pub fn find_type_method(&self, name: Name) -> Option<Method> {
        self.ancestors().find_map(|ty| ty.type_methods().lookup(name))
    }

    pub fn is_subtype_of(&self, other: &TypeRef) -> bool {
        self.ancestors().any(|ty| ty.ptr_eq(other))
    }

    pub fn new_instance(&self) -> ObjectRef {
        ObjectRef(Arc::new(Instance {
            id: next_object_id(),
            class: self.clone(),
            fields: RwLock::new(FxHashMap::default()),
            methods: MethodTable::new(),
        }))
    }

    pub fn ptr_eq(&self, other: &TypeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Iterator over a type and its supertypes.
pub struct Ancestors<'a> {
    next: Option<&'a TypeRef>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.superclass();
        Some(current)
    }
}

/// Instance state.
pub struct Instance {
    id: u64,
    class: TypeRef,
    fields: RwLock<FxHashMap<Name, Value>>,
    methods: MethodTable,
}

/// Shared handle to an instance.
#[derive(Clone)]
pub struct ObjectRef(Arc<Instance>);

impl ObjectRef {
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// The runtime type of this instance.
    pub fn class(&self) -> &TypeRef {
        &self.0.class
    }

    /// Read a field. Unset fields read as `Nil`.
    pub fn field(&self, name: Name) -> Value {
        self.0
            .fields
            .read()
            .get(&name)
            .cloned()
            .unwrap_or(Value::Nil)
    }

    /// Store a field, returning the previous value.
    pub fn set_field(&self, name: impl Into<Name>, value: Value) -> Option<Value> {
        self.0.fields.write().insert(name.into(), value)
    }

    pub fn has_field(&self, name: Name) -> bool {
        self.0.fields.read().contains_key(&name)
    }

    /// Methods defined on this instance alone.
    pub fn own_methods(&self) -> &MethodTable {
        &self.0.methods
    }

    /// Define a method on this instance only; its type and sibling
    /// instances are unaffected.
    pub fn define_singleton_method<F>(&self, name: impl Into<Name>, arity: Arity, body: F) -> &Self
    where
        F: Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync + 'static,
    {
        self.0.methods.define(Method::new(name, arity, body));
        self
    }

    /// Resolve a method: own table first, then the type's ancestor chain.
    pub fn find_method(&self, name: Name) -> Option<Method> {
        self.0
            .methods
            .lookup(name)
            .or_else(|| self.0.class.find_method(name))
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{} {}>", self.class().name(), self.id())
    }
}

#[cfg(test)]
mod tests;
