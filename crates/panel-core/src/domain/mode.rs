//! Target input mode.

/// How the operator chooses the target game server.
///
/// The mode is driven by the discovery checkbox: checked selects
/// [`DiscoveryMode::Discovery`], unchecked selects [`DiscoveryMode::Manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryMode {
    /// Pick a server from the fetched catalog.
    #[default]
    Discovery,
    /// Type `host:port` into the manual field.
    Manual,
}

impl DiscoveryMode {
    /// Maps the discovery checkbox value to a mode.
    pub fn from_checkbox(checked: bool) -> Self {
        if checked {
            Self::Discovery
        } else {
            Self::Manual
        }
    }

    /// The checkbox value that selects this mode.
    pub fn is_discovery(self) -> bool {
        matches!(self, Self::Discovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_maps_to_mode_and_back() {
        assert_eq!(DiscoveryMode::from_checkbox(true), DiscoveryMode::Discovery);
        assert_eq!(DiscoveryMode::from_checkbox(false), DiscoveryMode::Manual);
        assert!(DiscoveryMode::Discovery.is_discovery());
        assert!(!DiscoveryMode::Manual.is_discovery());
    }

    #[test]
    fn test_default_mode_is_discovery() {
        assert_eq!(DiscoveryMode::default(), DiscoveryMode::Discovery);
    }
}
