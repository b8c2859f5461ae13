// ── Credential generation ──

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated user passwords.
pub const GENERATED_PASSWORD_LEN: usize = 16;

/// Generate a random alphanumeric password.
///
/// `rand::rng()` is a CSPRNG, so these are handed out as real initial
/// credentials via the bootstrap report, not as placeholders.
pub fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
