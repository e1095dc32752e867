//! Post-wrap artifact check.
//!
//! This is a heuristic, not a correctness proof. It only tells whether the
//! output exists and whether it grew compared to the input. The tool injects
//! code into the archive, so a larger output usually means it did its job,
//! but recompression can make a wrapped archive smaller and a failed run can
//! leave a larger file behind.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;
use std::path::Path;

use crate::wrapper::error::{Error, ErrorExt, Result};
use crate::wrapper::journal::LogHandle;

/// What the post-wrap check observed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VerificationResult {
    /// Output archive exists
    pub artifact_present: bool,
    /// Input size in bytes, read only when the output exists
    pub original_size: Option<u64>,
    /// Output size in bytes
    pub produced_size: Option<u64>,
    /// Output is strictly larger than input
    pub size_increased: bool,
}

/// Compares the produced archive against the input.
///
/// A missing output is a result, not an error. Errors come from failing to
/// stat a file that does exist.
pub async fn verify(input: &Path, output: &Path) -> Result<VerificationResult> {
    compare_sizes(input, output)
        .await
        .map_err(|e| Error::Verification(e.to_string()))
}

async fn compare_sizes(input: &Path, output: &Path) -> Result<VerificationResult> {
    if !tokio::fs::try_exists(output)
        .await
        .fs_context("checking wrapped archive", output)?
    {
        return Ok(VerificationResult {
            artifact_present: false,
            original_size: None,
            produced_size: None,
            size_increased: false,
        });
    }

    let produced = tokio::fs::metadata(output)
        .await
        .fs_context("reading wrapped archive metadata", output)?
        .len();
    let original = tokio::fs::metadata(input)
        .await
        .fs_context("reading input archive metadata", input)?
        .len();

    Ok(VerificationResult {
        artifact_present: true,
        original_size: Some(original),
        produced_size: Some(produced),
        size_increased: produced > original,
    })
}

/// Runs [`verify`] and writes what it found to the wrap log.
///
/// Never fails: errors are logged and reported as `None`.
pub async fn verify_and_log(
    input: &Path,
    output: &Path,
    log: &LogHandle,
) -> Option<VerificationResult> {
    log.note("");
    log.note("Verifying wrapped IPA...");

    match verify(input, output).await {
        Ok(result) => {
            match (result.artifact_present, result.original_size, result.produced_size) {
                (true, Some(original), Some(produced)) => {
                    log.note(format!("✓ File exists: {} bytes", group_digits(produced)));
                    log.note(format!("Original size: {} bytes", group_digits(original)));
                    log.note(format!("Wrapped size: {} bytes", group_digits(produced)));
                    if result.size_increased {
                        log.note("✓ Size increased - wrapper likely applied (heuristic only)");
                    } else {
                        log.note("⚠ Size did not increase - inspect the wrapped IPA manually");
                    }
                    log.note("✓ Verification passed!");
                }
                _ => log.note("✗ Output file not found!"),
            }
            Some(result)
        }
        Err(e) => {
            log::warn!("Verification failed: {}", e);
            log.note(e.to_string());
            None
        }
    }
}

/// Formats a byte count with thousands separators.
pub fn group_digits(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}
