//! Forwarding configuration and its builder.

use std::sync::LazyLock;

use fwx_ir::Name;
use smallvec::{smallvec, SmallVec};

/// Names the engine treats specially.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardConfig {
    class_marker: Name,
    identity_marker: Name,
    key_method: Name,
    excluded: SmallVec<[Name; 2]>,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        ForwardConfig {
            class_marker: Name::intern("class"),
            identity_marker: Name::intern("identity"),
            key_method: Name::intern("get"),
            excluded: smallvec![Name::intern("__send__"), Name::intern("__id__")],
        }
    }
}

static DEFAULT_CONFIG: LazyLock<ForwardConfig> = LazyLock::new(ForwardConfig::default);

impl ForwardConfig {
    /// Shared instance of the default configuration.
    pub fn shared_default() -> &'static ForwardConfig {
        &DEFAULT_CONFIG
    }

    pub fn builder() -> ForwardConfigBuilder {
        ForwardConfigBuilder::new()
    }

    /// Receiver marker meaning "the forwarder's runtime type".
    pub fn class_marker(&self) -> Name {
        self.class_marker
    }

    /// Receiver marker meaning "the forwarder itself".
    pub fn identity_marker(&self) -> Name {
        self.identity_marker
    }

    /// Method keyed forwarders call on their receiver.
    pub fn key_method(&self) -> Name {
        self.key_method
    }

    /// Names bulk forwarding never installs.
    pub fn excluded(&self) -> &[Name] {
        &self.excluded
    }

    pub fn is_excluded(&self, name: Name) -> bool {
        self.excluded.contains(&name)
    }
}

/// Builder for [`ForwardConfig`]. Unset options keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct ForwardConfigBuilder {
    config: ForwardConfig,
}

impl ForwardConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class_marker(mut self, marker: impl Into<Name>) -> Self {
        self.config.class_marker = marker.into();
        self
    }

    #[must_use]
    pub fn identity_marker(mut self, marker: impl Into<Name>) -> Self {
        self.config.identity_marker = marker.into();
        self
    }

    /// Set the keyed lookup method, e.g. `[]` instead of `get`.
    #[must_use]
    pub fn key_method(mut self, method: impl Into<Name>) -> Self {
        self.config.key_method = method.into();
        self
    }

    /// Add a name to the bulk exclusion list.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<Name>) -> Self {
        let name = name.into();
        if !self.config.excluded.contains(&name) {
            self.config.excluded.push(name);
        }
        self
    }

    /// Drop every bulk exclusion, including the defaults.
    #[must_use]
    pub fn clear_exclusions(mut self) -> Self {
        self.config.excluded.clear();
        self
    }

    pub fn build(self) -> ForwardConfig {
        self.config
    }
}

#[cfg(test)]
mod tests;
