//! Constant-time comparison for signature checks.
//!
//! Every signature comparison in this crate goes through
//! [`constant_time_eq`], which is built on the `subtle` crate.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Constant-time byte comparison that does not leak input lengths or content.
///
/// Both inputs are hashed to fixed-length SHA-256 digests first, so timing
/// reveals neither where the inputs differ nor how long either one is.
pub fn constant_time_eq(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
    let (a, b) = (Sha256::digest(a.as_ref()), Sha256::digest(b.as_ref()));
    a.as_slice().ct_eq(b.as_slice()).into()
}

/// Compare a provided `X-Signature` value with the expected lowercase hex.
///
/// Matching is exact: hex case is significant and no prefix is accepted.
pub fn signature_matches(expected: &str, provided: &str) -> bool {
    constant_time_eq(expected, provided)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_signatures_match() {
        let sig = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        assert!(constant_time_eq(sig.as_bytes(), sig.as_bytes()));
    }

    #[test]
    fn last_byte_difference_does_not_match() {
        let a = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        let b = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3844";
        assert!(!constant_time_eq(a.as_bytes(), b.as_bytes()));
    }

    #[test]
    fn different_length_inputs_do_not_match() {
        assert!(!constant_time_eq(b"abc", b"abcdef"));
    }

    #[test]
    fn empty_vs_nonempty_do_not_match() {
        assert!(!constant_time_eq(b"", b"notempty"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!constant_time_eq(b"abcdef", b"ABCDEF"));
    }

    #[test]
    fn signature_match_is_exact() {
        let sig = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        assert!(signature_matches(sig, sig));
        assert!(!signature_matches(sig, &sig.to_uppercase()));
        assert!(!signature_matches(sig, &format!("sha256={sig}")));
        assert!(!signature_matches(sig, ""));
    }
}
