//! Wrap request and its builder.

use std::path::{Path, PathBuf};

use super::error::{Result, ValidationError};

/// A single, validated wrap invocation.
///
/// Built through [`WrapRequestBuilder`]. Fields are read-only once built.
///
/// # Examples
///
/// ```no_run
/// use intune_wrapper::wrapper::WrapRequest;
///
/// # fn example() -> intune_wrapper::wrapper::Result<()> {
/// let request = WrapRequest::builder()
///     .input("MyApp.ipa")
///     .output("MyApp-wrapped.ipa")
///     .profile("MyApp.mobileprovision")
///     .signing_identity("iPhone Distribution: Contoso")
///     .build()?;
/// assert!(request.verbose());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapRequest {
    input: PathBuf,
    output: PathBuf,
    profile: PathBuf,
    signing_identity: Option<String>,
    verbose: bool,
    verify_after_wrap: bool,
}

impl WrapRequest {
    /// Starts a builder with verbose logging and verification enabled.
    pub fn builder() -> WrapRequestBuilder {
        WrapRequestBuilder::new()
    }

    /// Input `.ipa` archive.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Destination of the wrapped archive.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Provisioning profile handed to the tool.
    pub fn profile(&self) -> &Path {
        &self.profile
    }

    /// Certificate used for re-signing, if any.
    pub fn signing_identity(&self) -> Option<&str> {
        self.signing_identity.as_deref()
    }

    /// Whether the tool runs with `-v`.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether the produced archive is checked after the tool exits.
    pub fn verify_after_wrap(&self) -> bool {
        self.verify_after_wrap
    }

    /// Re-checks every precondition against the current disk state.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.input) {
            return Err(ValidationError::InputMissing.into());
        }
        if !self.input.is_file() {
            return Err(ValidationError::InputNotFound(self.input.clone()).into());
        }
        if is_blank(&self.profile) {
            return Err(ValidationError::ProfileMissing.into());
        }
        if !self.profile.is_file() {
            return Err(ValidationError::ProfileNotFound(self.profile.clone()).into());
        }
        if is_blank(&self.output) {
            return Err(ValidationError::OutputMissing.into());
        }
        Ok(())
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Builder for constructing a [`WrapRequest`].
#[derive(Debug, Default)]
pub struct WrapRequestBuilder {
    input: PathBuf,
    output: Option<PathBuf>,
    profile: PathBuf,
    signing_identity: Option<String>,
    verbose: bool,
    verify_after_wrap: bool,
}

impl WrapRequestBuilder {
    /// Creates a builder with verbose logging and verification on.
    pub fn new() -> Self {
        Self {
            verbose: true,
            verify_after_wrap: true,
            ..Default::default()
        }
    }

    /// Sets the input archive.
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input = path.as_ref().to_path_buf();
        self
    }

    /// Sets the output archive.
    ///
    /// When never set, [`suggest_output_path`] is derived from the input.
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the provisioning profile.
    pub fn profile<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.profile = path.as_ref().to_path_buf();
        self
    }

    /// Sets the signing identity. Blank identities are dropped.
    pub fn signing_identity<S: Into<String>>(mut self, identity: S) -> Self {
        let identity = identity.into();
        self.signing_identity = if identity.trim().is_empty() {
            None
        } else {
            Some(identity)
        };
        self
    }

    /// Toggles the tool's verbose flag.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Toggles post-wrap verification.
    pub fn verify_after_wrap(mut self, verify: bool) -> Self {
        self.verify_after_wrap = verify;
        self
    }

    /// Builds and validates the request.
    pub fn build(self) -> Result<WrapRequest> {
        let request = self.build_unchecked();
        request.validate()?;
        Ok(request)
    }

    /// Builds without touching the filesystem.
    ///
    /// Used for command previews, where the files may live on another machine.
    pub fn build_unchecked(self) -> WrapRequest {
        let output = match self.output {
            Some(output) => output,
            None if is_blank(&self.input) => PathBuf::new(),
            None => suggest_output_path(&self.input),
        };

        WrapRequest {
            input: self.input,
            output,
            profile: self.profile,
            signing_identity: self.signing_identity,
            verbose: self.verbose,
            verify_after_wrap: self.verify_after_wrap,
        }
    }
}

/// Suggests `<dir>/<stem>-wrapped.ipa` next to the input archive.
pub fn suggest_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wrapped-app".to_string());
    let file_name = format!("{stem}-wrapped.ipa");

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
