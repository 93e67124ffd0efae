//! Installation targets.
//!
//! Setup on a type installs into the type's shared instance-method table,
//! visible to all its instances and to subtypes. Setup on an instance
//! installs into that instance's own table only.

use std::fmt;

use fwx_object::errors::singleton_unsupported;
use fwx_object::{EvalError, Method, ObjectRef, TypeRef, Value};

/// Method table a forwarder is installed into.
#[derive(Clone, Debug)]
pub enum InstallTarget {
    Type(TypeRef),
    Instance(ObjectRef),
}

impl InstallTarget {
    /// Define `method`, returning any method it replaced.
    pub fn install(&self, method: Method) -> Option<Method> {
        match self {
            InstallTarget::Type(ty) => ty.methods().define(method),
            InstallTarget::Instance(obj) => obj.own_methods().define(method),
        }
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallTarget::Type(ty) => write!(f, "type {}", ty.name()),
            InstallTarget::Instance(obj) => write!(f, "instance {obj:?}"),
        }
    }
}

/// Something forwarding methods can be installed on.
pub trait Forwarder {
    /// Decide where methods go: the type's table when `self` is a type,
    /// the instance's own table when it is an instance.
    fn install_target(&self) -> Result<InstallTarget, EvalError>;
}

impl Forwarder for TypeRef {
    fn install_target(&self) -> Result<InstallTarget, EvalError> {
        Ok(InstallTarget::Type(self.clone()))
    }
}

impl Forwarder for ObjectRef {
    fn install_target(&self) -> Result<InstallTarget, EvalError> {
        Ok(InstallTarget::Instance(self.clone()))
    }
}

impl Forwarder for InstallTarget {
    fn install_target(&self) -> Result<InstallTarget, EvalError> {
        Ok(self.clone())
    }
}

/// Only type and instance values carry method tables.
impl Forwarder for Value {
    fn install_target(&self) -> Result<InstallTarget, EvalError> {
        match self {
            Value::Type(ty) => Ok(InstallTarget::Type(ty.clone())),
            Value::Object(obj) => Ok(InstallTarget::Instance(obj.clone())),
            other => Err(singleton_unsupported(&other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests;
