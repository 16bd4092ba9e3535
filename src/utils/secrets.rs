//! Random secret generation for admin sessions and account recovery.

use base64::Engine as _;
use rand::Rng;

use crate::error::AppError;
use serde_json::json;

/// Random bytes behind a session token (256 bits).
const TOKEN_LENGTH_BYTES: usize = 32;

/// Random bytes mixed into each password hash.
pub const SALT_LENGTH_BYTES: usize = 16;

const RECOVERY_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const RECOVERY_GROUPS: usize = 4;
const RECOVERY_GROUP_LEN: usize = 4;

/// Fills `buffer` from the operating system RNG.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG is unavailable.
pub fn fill_random(buffer: &mut [u8]) -> Result<(), AppError> {
    getrandom::fill(buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })
}

/// Generates a session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character token.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG is unavailable.
pub fn generate_token() -> Result<String, AppError> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];
    fill_random(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Generates a human-typeable recovery code such as `K7QD-M2XA-9PRT-W4HB`.
///
/// The alphabet omits `0`, `1`, `I` and `O`.
pub fn generate_recovery_code() -> String {
    let mut rng = rand::rng();

    (0..RECOVERY_GROUPS)
        .map(|_| {
            (0..RECOVERY_GROUP_LEN)
                .map(|_| RECOVERY_CHARSET[rng.random_range(0..RECOVERY_CHARSET.len())] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_token().unwrap();

        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token().unwrap();
        let b = generate_token().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_recovery_code_format() {
        let code = generate_recovery_code();
        let groups: Vec<&str> = code.split('-').collect();

        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.len() == 4));
        assert!(!code.contains(['0', '1', 'I', 'O']));
    }
}
