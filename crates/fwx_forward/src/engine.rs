//! The forwarding engine.
//!
//! [`Forwarding`] turns setup calls into [`ForwardSpec`]s and installs them
//! on a [`Forwarder`]'s target. Receivers are classified once per setup call;
//! every generated method resolves its receiver again on each invocation.

use std::sync::LazyLock;

use fwx_ir::Name;
use fwx_object::{EvalError, Value};
use smallvec::SmallVec;

use crate::config::ForwardConfig;
use crate::forward_spec::ForwardSpec;
use crate::receiver::{IntoReceiver, ReceiverSpec};
use crate::target::{Forwarder, InstallTarget};

/// Engine applying forwarding setup under a [`ForwardConfig`].
#[derive(Clone, Debug, Default)]
pub struct Forwarding {
    config: ForwardConfig,
}

static GLOBAL: LazyLock<Forwarding> = LazyLock::new(Forwarding::default);

impl Forwarding {
    pub fn new(config: ForwardConfig) -> Self {
        Forwarding { config }
    }

    /// Engine with the default configuration, shared process-wide.
    pub fn global() -> &'static Forwarding {
        &GLOBAL
    }

    pub fn config(&self) -> &ForwardConfig {
        &self.config
    }

    /// Install `method` on `forwarder`, forwarding to the same name on
    /// `receiver`.
    pub fn forward<F, R>(
        &self,
        forwarder: &F,
        receiver: R,
        method: impl Into<Name>,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
    {
        let method = method.into();
        self.forward_as(forwarder, receiver, method, method)
    }

    /// Install `name` on `forwarder`, forwarding to `method` on `receiver`.
    pub fn forward_as<F, R>(
        &self,
        forwarder: &F,
        receiver: R,
        method: impl Into<Name>,
        name: impl Into<Name>,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
    {
        let target = forwarder.install_target()?;
        let receiver = receiver.into_receiver(&self.config);
        ForwardSpec::new(receiver, method.into(), name.into()).install(&target);
        Ok(())
    }

    /// Install one same-named forwarder per entry of `methods`, skipping the
    /// configured exclusions.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn forward_all<F, R, I>(
        &self,
        forwarder: &F,
        receiver: R,
        methods: I,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        let target = forwarder.install_target()?;
        let receiver = receiver.into_receiver(&self.config);
        self.install_all(&target, &receiver, methods);
        Ok(())
    }

    /// Table-style setup: each entry behaves like [`Forwarding::forward_all`]
    /// with its receiver. Entries are applied in iteration order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn delegate<F, K, R, I>(&self, forwarder: &F, mapping: I) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        K: Into<MethodNames>,
        R: IntoReceiver,
        I: IntoIterator<Item = (K, R)>,
    {
        let target = forwarder.install_target()?;
        for (methods, receiver) in mapping {
            let receiver = receiver.into_receiver(&self.config);
            self.install_all(&target, &receiver, methods.into());
        }
        Ok(())
    }

    /// Install `key` on `forwarder` as a keyed accessor: calling it sends the
    /// configured key method to `receiver` with `key` as first argument.
    pub fn forward_as_key<F, R>(
        &self,
        forwarder: &F,
        receiver: R,
        key: impl Into<Name>,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
    {
        let key = key.into();
        self.forward_as_key_as(forwarder, receiver, Value::Symbol(key), key)
    }

    /// Keyed accessor for `key` installed under `name`.
    ///
    /// `key` is passed to the key method as is: a `&str` or [`Name`] becomes
    /// a symbol, an integer indexes a list receiver.
    pub fn forward_as_key_as<F, R>(
        &self,
        forwarder: &F,
        receiver: R,
        key: impl Into<Value>,
        name: impl Into<Name>,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
    {
        let target = forwarder.install_target()?;
        let receiver = receiver.into_receiver(&self.config);
        ForwardSpec::keyed(receiver, self.config.key_method(), key.into(), name.into())
            .install(&target);
        Ok(())
    }

    /// One keyed accessor per entry of `keys`, skipping the configured
    /// exclusions.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn forward_as_key_all<F, R, I>(
        &self,
        forwarder: &F,
        receiver: R,
        keys: I,
    ) -> Result<(), EvalError>
    where
        F: Forwarder + ?Sized,
        R: IntoReceiver,
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        let target = forwarder.install_target()?;
        let receiver = receiver.into_receiver(&self.config);
        let key_method = self.config.key_method();
        for key in keys.into_iter().map(Into::into) {
            if self.skip_excluded(key) {
                continue;
            }
            ForwardSpec::keyed(receiver.clone(), key_method, Value::Symbol(key), key)
                .install(&target);
        }
        Ok(())
    }

    fn install_all<I>(&self, target: &InstallTarget, receiver: &ReceiverSpec, methods: I)
    where
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        for method in methods.into_iter().map(Into::into) {
            if self.skip_excluded(method) {
                continue;
            }
            ForwardSpec::new(receiver.clone(), method, method).install(target);
        }
    }

    fn skip_excluded(&self, name: Name) -> bool {
        let excluded = self.config.is_excluded(name);
        if excluded {
            tracing::trace!(%name, "skipping excluded name");
        }
        excluded
    }
}

/// Key of a [`Forwarding::delegate`] entry: one method name or several.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MethodNames {
    One(Name),
    Many(SmallVec<[Name; 4]>),
}

impl From<Name> for MethodNames {
    fn from(name: Name) -> Self {
        MethodNames::One(name)
    }
}

impl From<&str> for MethodNames {
    fn from(name: &str) -> Self {
        MethodNames::One(Name::intern(name))
    }
}

impl From<Vec<Name>> for MethodNames {
    fn from(names: Vec<Name>) -> Self {
        MethodNames::Many(names.into_iter().collect())
    }
}

impl From<&[&str]> for MethodNames {
    fn from(names: &[&str]) -> Self {
        MethodNames::Many(names.iter().map(|n| Name::intern(n)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MethodNames {
    fn from(names: [&str; N]) -> Self {
        MethodNames::Many(names.iter().map(|n| Name::intern(n)).collect())
    }
}

impl IntoIterator for MethodNames {
    type Item = Name;
    type IntoIter = smallvec::IntoIter<[Name; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            MethodNames::One(name) => {
                let mut one = SmallVec::new();
                one.push(name);
                one.into_iter()
            }
            MethodNames::Many(names) => names.into_iter(),
        }
    }
}
