//! Receiver specifiers: how a forwarder finds the object it forwards to.
//!
//! A raw specifier is classified once, at setup time, into a
//! [`ReceiverSpec`]. The installed method then calls
//! [`ReceiverSpec::resolve`] on every invocation, so field reassignments and
//! procs returning fresh objects are always observed.

use fwx_ir::Name;
use fwx_object::errors::no_such_method;
use fwx_object::{EvalResult, ObjectRef, ProcValue, TypeRef, Value};

use crate::config::ForwardConfig;

/// Classified receiver.
#[derive(Clone, Debug)]
pub enum ReceiverSpec {
    /// The forwarder's runtime type (subtypes see their own overrides).
    Class,
    /// The forwarder itself.
    Identity,
    /// A field on the forwarder, read at call time.
    Named(Name),
    /// A zero-argument proc evaluated with the forwarder as `self`.
    Proc(ProcValue),
    /// A fixed object captured at setup time.
    Object(Value),
}

impl ReceiverSpec {
    /// Classify a raw specifier.
    ///
    /// Priority: class marker, identity marker, any other symbol or string
    /// (a field name; a leading `@` is dropped), a zero-arity proc, and
    /// finally any other value as a fixed receiver. Nothing is rejected:
    /// a specifier that makes no sense fails later, when the forwarded
    /// method cannot be found on whatever it resolved to.
    pub fn classify(value: Value, config: &ForwardConfig) -> Self {
        if let Some(name) = value.as_name() {
            if name == config.class_marker() {
                return ReceiverSpec::Class;
            }
            if name == config.identity_marker() {
                return ReceiverSpec::Identity;
            }
            return ReceiverSpec::Named(field_name(name));
        }

        match value {
            Value::Proc(body) if body.arity() == 0 => ReceiverSpec::Proc(body),
            other => ReceiverSpec::Object(other),
        }
    }

    /// Resolve the receiver for one call on `forwarder`.
    pub fn resolve(&self, forwarder: &Value) -> EvalResult {
        match self {
            ReceiverSpec::Class => forwarder
                .class_of()
                .map(|ty| Value::Type(ty.clone()))
                .ok_or_else(|| no_such_method("class", &forwarder.type_name())),
            ReceiverSpec::Identity => Ok(forwarder.clone()),
            ReceiverSpec::Named(field) => Ok(forwarder.field(*field)),
            ReceiverSpec::Proc(body) => body.call_with_self(forwarder, &[]),
            ReceiverSpec::Object(value) => Ok(value.clone()),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReceiverSpec::Class => "class",
            ReceiverSpec::Identity => "identity",
            ReceiverSpec::Named(_) => "named",
            ReceiverSpec::Proc(_) => "proc",
            ReceiverSpec::Object(_) => "object",
        }
    }
}

/// `@rec` and `rec` both name the field `rec`.
fn field_name(name: Name) -> Name {
    name.as_str()
        .strip_prefix('@')
        .filter(|rest| !rest.is_empty())
        .map_or(name, Name::intern)
}

impl From<Value> for ReceiverSpec {
    fn from(value: Value) -> Self {
        ReceiverSpec::classify(value, ForwardConfig::shared_default())
    }
}

/// Anything usable as a receiver specifier in a setup call.
pub trait IntoReceiver {
    fn into_receiver(self, config: &ForwardConfig) -> ReceiverSpec;
}

impl IntoReceiver for ReceiverSpec {
    fn into_receiver(self, _config: &ForwardConfig) -> ReceiverSpec {
        self
    }
}

impl IntoReceiver for Value {
    fn into_receiver(self, config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::classify(self, config)
    }
}

/// A string specifier is read as a symbol.
impl IntoReceiver for &str {
    fn into_receiver(self, config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::classify(Value::symbol(self), config)
    }
}

impl IntoReceiver for Name {
    fn into_receiver(self, config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::classify(Value::Symbol(self), config)
    }
}

impl IntoReceiver for ProcValue {
    fn into_receiver(self, config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::classify(Value::Proc(self), config)
    }
}

impl IntoReceiver for ObjectRef {
    fn into_receiver(self, _config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::Object(Value::Object(self))
    }
}

impl IntoReceiver for TypeRef {
    fn into_receiver(self, _config: &ForwardConfig) -> ReceiverSpec {
        ReceiverSpec::Object(Value::Type(self))
    }
}
