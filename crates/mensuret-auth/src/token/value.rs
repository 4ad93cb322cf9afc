//! Random token values.

use rand::TryRngCore;
use rand::rngs::OsRng;

/// Draw `bytes` random bytes from the operating system RNG and hex-encode them.
///
/// A failing OS RNG is unrecoverable: the process aborts rather than hand
/// out tokens of unknown quality.
pub fn random_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];

    if let Err(e) = OsRng.try_fill_bytes(&mut buf) {
        tracing::error!(error = %e, "OS random number generator failed; aborting");
        std::process::abort();
    }

    hex::encode(buf)
}
