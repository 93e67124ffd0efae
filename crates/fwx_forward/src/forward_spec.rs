//! Forward specifications and the methods generated from them.

use fwx_ir::Name;
use fwx_object::{send, Arity, Method, Value};
use smallvec::SmallVec;

use crate::receiver::ReceiverSpec;
use crate::target::InstallTarget;

/// Everything needed to generate one forwarding method.
///
/// A spec lives only for the duration of a setup call: it is consumed by
/// [`ForwardSpec::install`] and the installed method is all that remains.
#[derive(Clone, Debug)]
pub struct ForwardSpec {
    pub receiver: ReceiverSpec,
    /// Method invoked on the resolved receiver.
    pub target_method: Name,
    /// Name the forwarder is installed under.
    pub exposed_name: Name,
    /// Arguments placed before the caller's arguments.
    pub extra_args: SmallVec<[Value; 1]>,
}

impl ForwardSpec {
    pub fn new(receiver: ReceiverSpec, target_method: Name, exposed_name: Name) -> Self {
        ForwardSpec {
            receiver,
            target_method,
            exposed_name,
            extra_args: SmallVec::new(),
        }
    }

    /// Spec for a keyed accessor: calls `key_method(key, ...)` on the receiver.
    ///
    /// The key is usually a symbol; an integer key reaches list entries.
    pub fn keyed(receiver: ReceiverSpec, key_method: Name, key: Value, exposed_name: Name) -> Self {
        let mut spec = Self::new(receiver, key_method, exposed_name);
        spec.extra_args.push(key);
        spec
    }

    /// Build the forwarding method.
    ///
    /// The method accepts any number of arguments. Each call resolves the
    /// receiver afresh, sends `target_method` with `extra_args ++ args` and
    /// the caller's block, and returns the outcome as is.
    pub fn into_method(self) -> Method {
        let ForwardSpec {
            receiver,
            target_method,
            exposed_name,
            extra_args,
        } = self;

        Method::new(exposed_name, Arity::AtLeast(0), move |this, args, block| {
            let resolved = receiver.resolve(this)?;
            tracing::trace!(
                exposed = %exposed_name,
                target = %target_method,
                receiver = receiver.kind(),
                resolved = %resolved.type_name(),
                "forwarding call"
            );
            if extra_args.is_empty() {
                return send(&resolved, target_method, args, block);
            }
            let mut full_args: SmallVec<[Value; 4]> = extra_args.iter().cloned().collect();
            full_args.extend(args.iter().cloned());
            send(&resolved, target_method, &full_args, block)
        })
    }

    /// Generate the method and define it on `target`.
    pub fn install(self, target: &InstallTarget) {
        let exposed_name = self.exposed_name;
        let target_method = self.target_method;
        let receiver_kind = self.receiver.kind();

        let replaced = target.install(self.into_method());
        tracing::debug!(
            %target,
            exposed = %exposed_name,
            target_method = %target_method,
            receiver = receiver_kind,
            replaced = replaced.is_some(),
            "installed forwarder"
        );
    }
}

#[cfg(test)]
mod tests;
