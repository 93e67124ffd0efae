//! Opt-in setup methods on forwarders.
//!
//! Importing [`Forwardable`] adds the setup operations, bound to the
//! default engine, to every [`Forwarder`]. Nothing is available without
//! the import.

use fwx_ir::Name;
use fwx_object::{EvalError, Value};

use crate::engine::{Forwarding, MethodNames};
use crate::receiver::IntoReceiver;
use crate::target::Forwarder;

pub trait Forwardable: Forwarder {
    fn forward<R: IntoReceiver>(
        &self,
        receiver: R,
        method: impl Into<Name>,
    ) -> Result<(), EvalError> {
        Forwarding::global().forward(self, receiver, method)
    }

    fn forward_as<R: IntoReceiver>(
        &self,
        receiver: R,
        method: impl Into<Name>,
        name: impl Into<Name>,
    ) -> Result<(), EvalError> {
        Forwarding::global().forward_as(self, receiver, method, name)
    }

    fn forward_all<R, I>(&self, receiver: R, methods: I) -> Result<(), EvalError>
    where
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        Forwarding::global().forward_all(self, receiver, methods)
    }

    fn delegate<K, R, I>(&self, mapping: I) -> Result<(), EvalError>
    where
        K: Into<MethodNames>,
        R: IntoReceiver,
        I: IntoIterator<Item = (K, R)>,
    {
        Forwarding::global().delegate(self, mapping)
    }

    fn forward_as_key<R: IntoReceiver>(
        &self,
        receiver: R,
        key: impl Into<Name>,
    ) -> Result<(), EvalError> {
        Forwarding::global().forward_as_key(self, receiver, key)
    }

    fn forward_as_key_as<R: IntoReceiver>(
        &self,
        receiver: R,
        key: impl Into<Value>,
        name: impl Into<Name>,
    ) -> Result<(), EvalError> {
        Forwarding::global().forward_as_key_as(self, receiver, key, name)
    }

    fn forward_as_key_all<R, I>(&self, receiver: R, keys: I) -> Result<(), EvalError>
    where
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        Forwarding::global().forward_as_key_all(self, receiver, keys)
    }

    // Aliases of `forward`/`forward_as`; `name` defaults to `method`.

    fn def_delegator<R: IntoReceiver>(
        &self,
        receiver: R,
        method: impl Into<Name>,
        name: Option<Name>,
    ) -> Result<(), EvalError> {
        let method = method.into();
        self.forward_as(receiver, method, name.unwrap_or(method))
    }

    fn def_instance_delegator<R: IntoReceiver>(
        &self,
        receiver: R,
        method: impl Into<Name>,
        name: Option<Name>,
    ) -> Result<(), EvalError> {
        self.def_delegator(receiver, method, name)
    }

    fn def_singleton_delegator<R: IntoReceiver>(
        &self,
        receiver: R,
        method: impl Into<Name>,
        name: Option<Name>,
    ) -> Result<(), EvalError> {
        self.def_delegator(receiver, method, name)
    }

    // Aliases of `forward_all`.

    fn def_delegators<R, I>(&self, receiver: R, methods: I) -> Result<(), EvalError>
    where
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        self.forward_all(receiver, methods)
    }

    fn def_instance_delegators<R, I>(&self, receiver: R, methods: I) -> Result<(), EvalError>
    where
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        self.forward_all(receiver, methods)
    }

    fn def_singleton_delegators<R, I>(&self, receiver: R, methods: I) -> Result<(), EvalError>
    where
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        self.forward_all(receiver, methods)
    }
}

impl<T: Forwarder + ?Sized> Forwardable for T {}
