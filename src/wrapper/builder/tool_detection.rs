//! Wrapping tool detection.
//!
//! Finds `IntuneMAMPackager` on disk. Nothing is cached: the tool may be
//! installed while the front-end is running, so every call re-probes.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::wrapper::platform::{Capability, HostPlatform};

/// File name of the wrapping tool.
pub const TOOL_NAME: &str = "IntuneMAMPackager";

/// Default install location on macOS.
pub const MACOS_APP_PATH: &str = "/Applications/IntuneMAMPackager/IntuneMAMPackager";

/// System-wide binary location on macOS, also the default elsewhere.
pub const SYSTEM_BIN_PATH: &str = "/usr/local/bin/IntuneMAMPackager";

/// Fixed location on Windows. Informational only, the tool never runs there.
pub const WINDOWS_PATH: &str = r"C:\IntuneWrapper\IntuneMAMPackager\IntuneMAMPackager.exe";

/// Where the tool releases are published.
pub const DOWNLOAD_URL: &str = "https://github.com/msintuneappsdk/intune-app-wrapping-tool-ios";

/// Outcome of probing for the tool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "state", content = "path", rename_all = "lowercase")]
pub enum ToolLocation {
    /// The tool exists at this path
    Found(PathBuf),
    /// Nothing exists at the default path reported here
    Missing(PathBuf),
}

impl ToolLocation {
    /// Path to launch or to report, whichever state this is.
    pub fn path(&self) -> &Path {
        match self {
            ToolLocation::Found(path) | ToolLocation::Missing(path) => path,
        }
    }

    /// Whether the tool exists.
    pub fn is_found(&self) -> bool {
        matches!(self, ToolLocation::Found(_))
    }
}

/// Probes candidate locations for the tool.
#[derive(Clone, Debug)]
pub struct ToolLocator {
    platform: HostPlatform,
    candidates: Vec<PathBuf>,
}

impl ToolLocator {
    /// Locator with the standard candidates for `platform`.
    ///
    /// macOS probes, in order: the application bundle, `~/IntuneWrapper`,
    /// then `/usr/local/bin`. Other platforms have a single fixed path.
    pub fn for_platform(platform: HostPlatform) -> Self {
        let candidates = match platform {
            HostPlatform::MacOs => {
                let mut candidates = vec![PathBuf::from(MACOS_APP_PATH)];
                match dirs::home_dir() {
                    Some(home) => candidates.push(home.join("IntuneWrapper").join(TOOL_NAME)),
                    None => log::debug!("No home directory, skipping per-user tool location"),
                }
                candidates.push(PathBuf::from(SYSTEM_BIN_PATH));
                candidates
            }
            HostPlatform::Windows => vec![PathBuf::from(WINDOWS_PATH)],
            HostPlatform::Other => vec![PathBuf::from(SYSTEM_BIN_PATH)],
        };

        Self {
            platform,
            candidates,
        }
    }

    /// Locator with an explicit candidate list, in priority order.
    ///
    /// An empty list falls back to the platform defaults.
    pub fn with_candidates(platform: HostPlatform, candidates: Vec<PathBuf>) -> Self {
        if candidates.is_empty() {
            return Self::for_platform(platform);
        }
        Self {
            platform,
            candidates,
        }
    }

    /// Candidate paths in priority order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Resolves the tool location against the current disk state.
    ///
    /// On the capable platform the first existing candidate wins and the
    /// first candidate is the default. Elsewhere the fixed path is reported
    /// as is and the disk is consulted only to say whether it exists.
    pub fn locate(&self) -> ToolLocation {
        // for_platform and with_candidates never leave the list empty
        let default = self.candidates[0].clone();

        match self.platform.capability() {
            Capability::Capable => {
                for candidate in &self.candidates {
                    if candidate.is_file() {
                        log::debug!("Found {} at: {}", TOOL_NAME, candidate.display());
                        return ToolLocation::Found(candidate.clone());
                    }
                    log::debug!("{} not at: {}", TOOL_NAME, candidate.display());
                }
                ToolLocation::Missing(default)
            }
            Capability::Incapable => {
                if default.is_file() {
                    ToolLocation::Found(default)
                } else {
                    ToolLocation::Missing(default)
                }
            }
        }
    }
}

/// Resolves the tool path for `platform` using the standard candidates.
pub fn locate(platform: HostPlatform) -> ToolLocation {
    ToolLocator::for_platform(platform).locate()
}

/// Resolves a user-supplied tool path.
///
/// Anything with a directory component is taken literally. A bare program
/// name that exists in the working directory resolves to `./<name>`, since
/// launching the bare name would search `PATH` instead. Otherwise it is
/// looked up on `PATH` and reported missing if not found there.
pub fn resolve_override(tool: &Path) -> ToolLocation {
    let is_bare_name = tool.components().count() == 1 && !tool.is_absolute();

    if is_bare_name {
        if tool.is_file() {
            return ToolLocation::Found(Path::new(".").join(tool));
        }
        return match which::which(tool) {
            Ok(path) => {
                log::debug!("Resolved {} on PATH: {}", tool.display(), path.display());
                ToolLocation::Found(path)
            }
            Err(e) => {
                log::debug!("{} not found on PATH: {}", tool.display(), e);
                ToolLocation::Missing(tool.to_path_buf())
            }
        };
    }

    if tool.is_file() {
        ToolLocation::Found(tool.to_path_buf())
    } else {
        ToolLocation::Missing(tool.to_path_buf())
    }
}

/// Download and install steps for the given capability class.
pub fn install_instructions(capability: Capability) -> String {
    match capability {
        Capability::Capable => format!(
            "macOS Instructions:\n\
             1. Visit: {DOWNLOAD_URL}\n\
             2. Download the latest release (v20.8.0 or higher)\n\
             3. Extract to /Applications/IntuneMAMPackager/\n\
             4. Make executable: chmod +x {MACOS_APP_PATH}"
        ),
        Capability::Incapable => format!(
            "Instructions for this platform:\n\
             1. Visit: {DOWNLOAD_URL}\n\
             2. Note: Wrapping requires macOS - use this tool to prepare files\n\
             3. Transfer files to a Mac or use CI/CD (GitHub Actions)"
        ),
    }
}
