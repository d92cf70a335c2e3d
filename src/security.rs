use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::constants::{PASSWORD_HASH_ROUNDS, PASSWORD_SALT_LEN};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with a fresh random salt
///
/// Returns `(hash, salt)`, both hex encoded.
pub fn hash_password(password: &str) -> (String, String) {
    let mut salt = [0u8; PASSWORD_SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    (hash_with_salt(password, &salt), hex::encode(salt))
}

/// PBKDF2-HMAC-SHA256 of `password` with the given raw salt, hex encoded
pub fn hash_with_salt(password: &str, salt: &[u8]) -> String {
    let mut hash = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PASSWORD_HASH_ROUNDS, &mut hash);
    hex::encode(hash)
}

/// Check a password against a stored hex hash and hex salt
pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    let salt = match hex::decode(salt) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Stored password salt is not valid hex");
            return false;
        }
    };

    let expected = match hex::decode(hash) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Stored password hash is not valid hex");
            return false;
        }
    };

    let mut computed = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PASSWORD_HASH_ROUNDS, &mut computed);

    constant_time_eq(&computed, &expected)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// =============================================================================
// HMAC Signing
// =============================================================================

/// Sign data with HMAC-SHA256, hex encoded
pub fn sign(data: &str, secret: &str) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        tracing::error!("Failed to create HMAC instance");
        return String::new();
    };
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify HMAC-SHA256 signature
///
/// # Arguments
/// * `data` - The data that was signed
/// * `signature` - The hex-encoded HMAC signature
/// * `secret` - The shared secret key (from environment)
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    // Create HMAC instance with secret key
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    // Update with data
    mac.update(data.as_bytes());

    // Decode hex signature
    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    // Verify signature
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Encode a value as `hex(value).hex(hmac)` for use in a cookie
pub fn seal(value: &str, secret: &str) -> String {
    let payload = hex::encode(value.as_bytes());
    let signature = sign(&payload, secret);
    format!("{payload}.{signature}")
}

/// Reverse [`seal`], returning `None` for tampered or malformed values
pub fn unseal(sealed: &str, secret: &str) -> Option<String> {
    let (payload, signature) = sealed.split_once('.')?;

    if !verify_hmac(payload, signature, secret) {
        tracing::warn!("Rejected cookie with invalid signature");
        return None;
    }

    let bytes = hex::decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Password Tests
    // =========================================================================

    #[test]
    fn test_hash_password_round_trip() {
        let (hash, salt) = hash_password("senha123");

        assert_eq!(hash.len(), 64);
        assert_eq!(salt.len(), PASSWORD_SALT_LEN * 2);
        assert!(verify_password("senha123", &hash, &salt));
        assert!(!verify_password("senha124", &hash, &salt));
    }

    #[test]
    fn test_hash_password_salts_differ() {
        let (hash_1, salt_1) = hash_password("same");
        let (hash_2, salt_2) = hash_password("same");

        // Same password, different salts, different hashes
        assert_ne!(salt_1, salt_2);
        assert_ne!(hash_1, hash_2);
    }

    #[test]
    fn test_hash_with_salt_deterministic() {
        let salt = [7u8; PASSWORD_SALT_LEN];
        assert_eq!(hash_with_salt("abc", &salt), hash_with_salt("abc", &salt));
        assert_ne!(hash_with_salt("abc", &salt), hash_with_salt("abd", &salt));
    }

    #[test]
    fn test_verify_password_malformed_record() {
        assert!(!verify_password("x", "not-hex", "00"));
        assert!(!verify_password("x", "00", "not-hex"));
        assert!(!verify_password("x", "00", "00"));
    }

    // =========================================================================
    // HMAC Tests
    // =========================================================================

    #[test]
    fn test_verify_hmac_valid() {
        let secret = "test-secret-key";
        let data = "test data";

        // Generate valid signature
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(data.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        assert_eq!(sign(data, secret), signature);
        assert!(verify_hmac(data, &signature, secret));
    }

    #[test]
    fn test_verify_hmac_invalid_signature() {
        let wrong_signature = "0".repeat(64);
        assert!(!verify_hmac("test data", &wrong_signature, "test-secret-key"));
        assert!(!verify_hmac("test data", "zz", "test-secret-key"));
    }

    #[test]
    fn test_verify_hmac_wrong_secret() {
        let signature = sign("test data", "test-secret-key");
        assert!(!verify_hmac("test data", &signature, "wrong-secret"));
    }

    // =========================================================================
    // Cookie Sealing Tests
    // =========================================================================

    #[test]
    fn test_seal_unseal() {
        let sealed = seal("Ana; Path=/", "secret");

        // Cookie-unsafe characters never appear in the sealed value
        assert!(sealed.chars().all(|c| c.is_ascii_hexdigit() || c == '.'));
        assert_eq!(unseal(&sealed, "secret").as_deref(), Some("Ana; Path=/"));
    }

    #[test]
    fn test_unseal_rejects_tampering() {
        let sealed = seal("Ana", "secret");
        let (_, signature) = sealed.split_once('.').unwrap();
        let forged = format!("{}.{}", hex::encode("admin"), signature);

        assert_eq!(unseal(&forged, "secret"), None);
        assert_eq!(unseal(&sealed, "other-secret"), None);
        assert_eq!(unseal("no-dot", "secret"), None);
    }
}
