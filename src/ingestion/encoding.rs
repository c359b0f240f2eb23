//! Character encoding detection and the ranked fallback chain.
//!
//! Detection is a *hint*, not a guarantee: the reader treats the detected
//! encoding as the first candidate in [`candidate_encodings`] and advances on
//! decode failure. Detection itself never fails; when the heuristic cannot
//! decide it returns windows-1252, which decodes any byte stream.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, ISO_8859_15, UTF_8, WINDOWS_1252};

/// How many leading bytes to sample for detection.
const SAMPLE_LEN: u64 = 64 * 1024;

/// Detect the most likely encoding of the file at `path`.
pub fn detect_encoding(path: impl AsRef<Path>) -> &'static Encoding {
    let mut sample = Vec::new();
    let read = File::open(path.as_ref())
        .and_then(|f| f.take(SAMPLE_LEN).read_to_end(&mut sample));
    if read.is_err() {
        return WINDOWS_1252;
    }
    detect_encoding_in(&sample)
}

/// Detect the most likely encoding from a byte sample.
///
/// BOM wins outright; otherwise valid UTF-8 is assumed to be UTF-8 and
/// anything else falls back to windows-1252.
pub fn detect_encoding_in(sample: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(sample) {
        return encoding;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => UTF_8,
        // A multi-byte sequence cut off at the sample boundary is still UTF-8.
        Err(e) if e.error_len().is_none() => UTF_8,
        Err(_) => WINDOWS_1252,
    }
}

/// Ranked candidate list for the decode-retry loop.
///
/// The fixed tail holds widely-used single-byte encodings and ends in
/// windows-1252, which can decode any byte stream, so the loop always
/// terminates with at least one decodable candidate. UTF-16 variants only
/// enter the chain as the detected encoding (via BOM); trying them blindly
/// would "decode" arbitrary even-length byte streams into garbage.
pub fn candidate_encodings(detected: &'static Encoding) -> Vec<&'static Encoding> {
    let mut chain = vec![detected, UTF_8, ISO_8859_15, WINDOWS_1252];
    let mut seen: Vec<&str> = Vec::with_capacity(chain.len());
    chain.retain(|e| {
        if seen.contains(&e.name()) {
            false
        } else {
            seen.push(e.name());
            true
        }
    });
    chain
}
