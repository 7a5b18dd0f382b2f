use chrono::Utc;
use rand::Rng;

/// Lowercase base-36 alphabet for the random suffix.
const SUFFIX_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LENGTH: usize = 9;
const PREFIX: &str = "TXN";

/// Generate a recharge transaction id: `TXN`, the current Unix time in
/// milliseconds, then 9 random base-36 characters.
pub fn generate_transaction_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARS.len());
            SUFFIX_CHARS[idx] as char
        })
        .collect();

    format!("{PREFIX}{}{suffix}", Utc::now().timestamp_millis())
}
