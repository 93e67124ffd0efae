//! Runtime values of the object model.
//!
//! Heap payloads are wrapped in [`Heap`], whose constructor is private to
//! this module: strings, lists and maps are built through the `Value::`
//! factory methods only.
//!
//! Equality is structural for data (`Int`, `Str`, `List`, ...) and by
//! identity for objects, types and procs.

mod heap;
mod proc_value;

use std::borrow::Cow;
use std::fmt;

use fwx_ir::Name;
use rustc_hash::FxHashMap;

use crate::object::{ObjectRef, TypeRef};

pub use heap::Heap;
pub use proc_value::{ProcBody, ProcValue};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Immediates
    /// The absent value; also what an unset field reads as.
    Nil,
    Bool(bool),
    Int(i64),
    /// Interned symbol (`:name`).
    Symbol(Name),

    // Heap Types
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    /// Table keyed by symbol.
    Map(Heap<FxHashMap<Name, Value>>),

    // Reference Types
    /// Instance of a user type.
    Object(ObjectRef),
    /// A type used as a value (receiver of type-level methods).
    Type(TypeRef),
    Proc(ProcValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn symbol(name: impl Into<Name>) -> Self {
        Value::Symbol(name.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value from `(key, value)` pairs.
    ///
    /// ```text
    /// let table = Value::map([("a", Value::int(1)), ("b", Value::int(2))]);
    /// ```
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<Name>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let table = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Map(Heap::new(table))
    }

    /// Wrap a closure as a proc value.
    pub fn proc<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> crate::EvalResult + Send + Sync + 'static,
    {
        Value::Proc(ProcValue::new(arity, body))
    }
}

// Value Methods

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Name> {
        match self {
            Value::Symbol(name) => Some(*name),
            _ => None,
        }
    }

    /// Name-like values: symbols and strings.
    pub fn as_name(&self) -> Option<Name> {
        match self {
            Value::Symbol(name) => Some(*name),
            Value::Str(s) => Some(Name::intern(s)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_proc(&self) -> Option<&ProcValue> {
        match self {
            Value::Proc(p) => Some(p),
            _ => None,
        }
    }

    /// Read a field by name. Non-objects and unset fields read as `Nil`.
    pub fn field(&self, name: Name) -> Value {
        match self {
            Value::Object(obj) => obj.field(name),
            _ => Value::Nil,
        }
    }

    /// The type of an instance.
    pub fn class_of(&self) -> Option<&TypeRef> {
        self.as_object().map(ObjectRef::class)
    }

    /// Identity of reference values; immediates and plain data have none.
    pub fn object_id(&self) -> Option<u64> {
        match self {
            Value::Object(obj) => Some(obj.id()),
            Value::Type(ty) => Some(ty.id()),
            Value::Proc(p) => u64::try_from(p.addr()).ok(),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    ///
    /// Instances report the name of their type.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::Nil => Cow::Borrowed("nil"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Int(_) => Cow::Borrowed("int"),
            Value::Symbol(_) => Cow::Borrowed("symbol"),
            Value::Str(_) => Cow::Borrowed("str"),
            Value::List(_) => Cow::Borrowed("list"),
            Value::Map(_) => Cow::Borrowed("map"),
            Value::Object(obj) => Cow::Borrowed(obj.class().name().as_str()),
            Value::Type(_) => Cow::Borrowed("Class"),
            Value::Proc(_) => Cow::Borrowed("proc"),
        }
    }

    /// Display value for user output.
    pub fn display_value(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Symbol(name) => format!(":{name}"),
            Value::Str(s) => s.to_string(),
            Value::List(items) => {
                let inner: Vec<_> = items.iter().map(Value::display_value).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by_key(|(k, _)| k.as_str());
                let inner: Vec<_> = entries
                    .into_iter()
                    .map(|(k, v)| format!("{k}: {}", v.display_value()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Object(obj) => format!("#<{} {}>", obj.class().name(), obj.id()),
            Value::Type(ty) => ty.name().to_string(),
            Value::Proc(p) => format!("{p:?}"),
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Type(a), Value::Type(b)) => a.ptr_eq(b),
            (Value::Proc(a), Value::Proc(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Symbol(name) => write!(f, "Symbol({name:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(_) => write!(f, "Map({})", self.display_value()),
            Value::Object(obj) => write!(f, "Object({obj:?})"),
            Value::Type(ty) => write!(f, "Type({ty:?})"),
            Value::Proc(p) => write!(f, "Proc({p:?})"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Name> for Value {
    fn from(name: Name) -> Self {
        Value::Symbol(name)
    }
}

/// Bare string literals are read as symbols, the way keys and method names
/// are written. Use [`Value::string`] for string data.
impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Value::Symbol(Name::intern(name))
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<TypeRef> for Value {
    fn from(ty: TypeRef) -> Self {
        Value::Type(ty)
    }
}

impl From<ProcValue> for Value {
    fn from(p: ProcValue) -> Self {
        Value::Proc(p)
    }
}
