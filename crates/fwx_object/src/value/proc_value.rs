//! Callable values: procs and trailing blocks.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::errors::wrong_arg_count;
use crate::EvalResult;

/// Body of a proc: receives the `self` context it runs in, then its arguments.
pub type ProcBody = dyn Fn(&Value, &[Value]) -> EvalResult + Send + Sync;

/// A first-class callable with a fixed arity.
///
/// The same type serves as the optional trailing block passed along with a
/// message send.
#[derive(Clone)]
pub struct ProcValue {
    arity: usize,
    body: Arc<ProcBody>,
}

impl ProcValue {
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        ProcValue {
            arity,
            body: Arc::new(body),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call with a `nil` self context.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        self.call_with_self(&Value::Nil, args)
    }

    /// Call with `self_value` as the execution context.
    ///
    /// This is how a proc reads the fields of the object it is evaluated
    /// against: the object is handed to the body explicitly.
    pub fn call_with_self(&self, self_value: &Value, args: &[Value]) -> EvalResult {
        if args.len() != self.arity {
            return Err(wrong_arg_count("proc", self.arity, args.len()));
        }
        (self.body)(self_value, args)
    }

    /// Whether both procs share the same body.
    pub fn ptr_eq(&self, other: &ProcValue) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    /// Address of the body allocation, used as the proc's identity.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.body).cast::<()>() as usize
    }
}

impl fmt::Debug for ProcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<proc/{}>", self.arity)
    }
}
