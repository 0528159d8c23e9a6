use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request timestamp with the robot secret.
///
/// Computes `HMAC-SHA256(secret, "<timestamp>\n<secret>")` and encodes the
/// raw MAC with padded standard base64. The endpoint recomputes the same
/// value, so this must stay byte-for-byte compatible.
pub fn sign(secret: &str, timestamp: &str) -> String {
    let string_to_sign = format!("{timestamp}\n{secret}");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(string_to_sign.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Current Unix time in milliseconds, truncated to whole seconds.
///
/// The endpoint only accepts timestamps within an hour of its own clock and
/// signatures computed over this exact string.
pub fn timestamp_millis() -> String {
    (chrono::Utc::now().timestamp() * 1000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_vector() {
        assert_eq!(
            sign("this is a secret", "1601187240000"),
            "7gmCSzcAc2XzfB14K9+cRSM1hqBng7kT+N5k61qXXz0="
        );
    }

    #[test]
    fn deterministic() {
        let a = sign("SECabc", "1700000000000");
        let b = sign("SECabc", "1700000000000");
        assert_eq!(a, b);
    }

    #[test]
    fn depends_on_secret_and_timestamp() {
        let base = sign("secret1", "1700000000000");
        assert_ne!(base, sign("secret2", "1700000000000"));
        assert_ne!(base, sign("secret1", "1700000001000"));
    }

    #[test]
    fn padded_standard_base64() {
        let signature = sign("secret", "0");
        // 32-byte MAC encodes to 44 chars with one pad byte.
        assert_eq!(signature.len(), 44);
        assert!(signature.ends_with('='));
        assert!(STANDARD.decode(&signature).is_ok());
    }

    #[test]
    fn empty_secret_still_signs() {
        assert_eq!(sign("", "1").len(), 44);
    }

    #[test]
    fn timestamp_is_whole_seconds() {
        let ts = timestamp_millis();
        let millis: i64 = ts.parse().unwrap();
        assert_eq!(millis % 1000, 0);
        assert!(millis > 1_600_000_000_000);
    }
}
