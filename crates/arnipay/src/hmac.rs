use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::SHA256_PREFIX;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &[u8], message: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    mac
}

/// HMAC-SHA256 of `message` as lowercase hex (always 64 characters).
pub fn compute_hmac(secret: &[u8], message: impl AsRef<[u8]>) -> String {
    hex::encode(keyed_mac(secret, message.as_ref()).finalize().into_bytes())
}

/// [`compute_hmac`] in header form: `sha256=<hex>`.
pub fn compute_prefixed_hmac(secret: &[u8], message: impl AsRef<[u8]>) -> String {
    format!("{SHA256_PREFIX}{}", compute_hmac(secret, message))
}

/// Verify a hex HMAC-SHA256 signature over `message`. The `sha256=` prefix
/// is optional.
///
/// Uses the MAC's constant-time comparison. Invalid hex is compared against
/// zeros so malformed signatures take the same path as wrong ones.
pub fn verify_hmac(secret: &[u8], message: impl AsRef<[u8]>, signature: &str) -> bool {
    let mac = keyed_mac(secret, message.as_ref());
    let signature = signature.strip_prefix(SHA256_PREFIX).unwrap_or(signature);
    let provided = hex::decode(signature).unwrap_or_else(|_| vec![0u8; 32]);
    mac.verify_slice(&provided).is_ok()
}

pub(crate) mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if s.len() % 2 != 0 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // RFC 4231 test case 2
        let sig = compute_hmac(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn output_is_lowercase_hex_of_fixed_length() {
        let sig = compute_hmac(b"s", b"");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn roundtrip() {
        let sig = compute_hmac(b"whsec", b"{\"event\":\"payment.completed\"}");
        assert!(verify_hmac(b"whsec", b"{\"event\":\"payment.completed\"}", &sig));
    }

    #[test]
    fn wrong_secret() {
        let sig = compute_hmac(b"secret-1", b"body");
        assert!(!verify_hmac(b"secret-2", b"body", &sig));
    }

    #[test]
    fn tampered_message() {
        let sig = compute_hmac(b"secret", b"original");
        assert!(!verify_hmac(b"secret", b"tampered", &sig));
    }

    #[test]
    fn invalid_hex() {
        assert!(!verify_hmac(b"secret", b"body", "not-hex-zz"));
        assert!(!verify_hmac(b"secret", b"body", "abc"));
    }

    #[test]
    fn prefixed_form_verifies() {
        let header = compute_prefixed_hmac(b"whsec", b"body");
        assert!(header.starts_with("sha256="));
        assert!(verify_hmac(b"whsec", b"body", &header));
        assert!(verify_hmac(b"whsec", b"body", &header["sha256=".len()..]));
        assert!(!verify_hmac(b"whsec", b"body", &format!("sha512={}", &header[7..])));
    }

    #[test]
    fn non_utf8_message() {
        let body: &[u8] = b"{\"data\":\"\xff\"}";
        let sig = compute_hmac(b"whsec", body);
        assert!(verify_hmac(b"whsec", body, &sig));
    }

    #[test]
    fn sign_characters_are_not_hex() {
        let sig = compute_hmac(b"secret", b"body");
        let mangled = format!("+{}", &sig[1..]);
        assert!(!verify_hmac(b"secret", b"body", &mangled));
    }
}
