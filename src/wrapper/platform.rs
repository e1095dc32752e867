//! Host platform identity and wrap capability.

use serde::Serialize;
use std::fmt;

/// Host operating system as far as wrapping is concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    /// macOS with Xcode, the only host the tool runs on
    MacOs,
    /// Windows
    Windows,
    /// Linux and everything else
    Other,
}

/// Whether the wrapping tool can execute on a host.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// The tool runs here
    Capable,
    /// Files can be validated and a command prepared, nothing more
    Incapable,
}

impl HostPlatform {
    /// Detects the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            HostPlatform::MacOs
        } else if cfg!(target_os = "windows") {
            HostPlatform::Windows
        } else {
            HostPlatform::Other
        }
    }

    /// Capability class of this platform.
    pub fn capability(self) -> Capability {
        match self {
            HostPlatform::MacOs => Capability::Capable,
            HostPlatform::Windows | HostPlatform::Other => Capability::Incapable,
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostPlatform::MacOs => "macOS",
            HostPlatform::Windows => "Windows",
            HostPlatform::Other => std::env::consts::OS,
        };
        f.write_str(name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Capable => f.write_str("capable"),
            Capability::Incapable => f.write_str("incapable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_macos_is_capable() {
        assert_eq!(HostPlatform::MacOs.capability(), Capability::Capable);
        assert_eq!(HostPlatform::Windows.capability(), Capability::Incapable);
        assert_eq!(HostPlatform::Other.capability(), Capability::Incapable);
    }
}
