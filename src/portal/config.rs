//! Construction-time configuration for portal nodes.

use compact_str::CompactString;

/// Default tag of the detached container.
pub const DEFAULT_TAG: &str = "div";

// =============================================================================
// DetachPolicy
// =============================================================================

/// What happens to relayed props when the owning attachment point unmounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetachPolicy {
    /// Keep the last pushed props; a later attachment point inherits them
    /// until it pushes its own.
    #[default]
    RetainProps,
    /// Clear pushed props and notify the renderer with the empty set, so
    /// content reverts to its declared props.
    ResetProps,
}

// =============================================================================
// PortalConfig
// =============================================================================

/// Configuration for a portal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Tag of the detached container element.
    pub tag: CompactString,
    /// Prop handling when the attachment point goes away.
    pub detach: DetachPolicy,
}

impl PortalConfig {
    /// Block container (`div`), props retained on detach.
    pub const DIV: Self = Self {
        tag: CompactString::const_new(DEFAULT_TAG),
        detach: DetachPolicy::RetainProps,
    };

    /// Inline container (`span`), props retained on detach.
    pub const SPAN: Self = Self {
        tag: CompactString::const_new("span"),
        detach: DetachPolicy::RetainProps,
    };

    /// Create the default config.
    pub fn new() -> Self {
        Self::DIV
    }

    /// Set the container tag.
    pub fn with_tag(mut self, tag: impl Into<CompactString>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the detach policy.
    pub fn with_detach(mut self, detach: DetachPolicy) -> Self {
        self.detach = detach;
        self
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.tag, "div");
        assert_eq!(config.detach, DetachPolicy::RetainProps);
        assert_eq!(PortalConfig::SPAN.tag, "span");
    }

    #[test]
    fn test_config_builder() {
        let config = PortalConfig::new()
            .with_tag("section")
            .with_detach(DetachPolicy::ResetProps);
        assert_eq!(config.tag, "section");
        assert_eq!(config.detach, DetachPolicy::ResetProps);
    }
}
