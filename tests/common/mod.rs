//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

/// Input archive, profile, and output destination inside a temp directory.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub input: PathBuf,
    pub profile: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    /// Creates a 100 byte input archive and a profile. Paths contain spaces.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let apps = dir.path().join("My Apps");
        std::fs::create_dir_all(&apps).expect("create apps dir");

        let input = apps.join("Contoso App.ipa");
        let profile = apps.join("Contoso Dist.mobileprovision");
        let output = apps.join("Contoso App-wrapped.ipa");
        std::fs::write(&input, vec![7u8; 100]).expect("write input");
        std::fs::write(&profile, b"profile").expect("write profile");

        Self {
            dir,
            input,
            profile,
            output,
        }
    }

    /// Writes an executable `/bin/sh` script standing in for the wrapping tool.
    ///
    /// The tool is called as `-i <in> -o <out> -p <profile> [-c <id>] [-v]`,
    /// so `$4` is the output path.
    #[cfg(unix)]
    pub fn mock_tool(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write mock tool");
        let mut perms = std::fs::metadata(&path).expect("stat mock tool").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod mock tool");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

