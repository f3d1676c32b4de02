//! Deterministic crypto helpers backing the digest and signature handlers.
//!
//! Everything callable from the dispatch pipeline is deterministic and
//! allocation-bounded. Key generation uses OS randomness and is gated
//! behind the `std` feature — it exists for hosts and tests only, never
//! for the sandboxed guest.

use crate::types::Digest;

/// Compute the BLAKE3 digest of the input.
pub fn digest_blake3(data: &[u8]) -> Digest {
    *blake3::hash(data).as_bytes()
}

/// Compute the SHA-256 digest of the input.
pub fn digest_sha256(data: &[u8]) -> Digest {
    use sha2::Digest as _;
    let result = sha2::Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Verify an Ed25519 signature.
///
/// Deterministic: a malformed public key yields `false`, never an error
/// or a panic.
pub fn verify_ed25519(message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> bool {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

/// Sign a message with an Ed25519 private key.
///
/// Host/test-side only; signing never happens inside the guest.
#[cfg(feature = "std")]
pub fn sign_ed25519(message: &[u8], secret_key: &ed25519_dalek::SigningKey) -> [u8; 64] {
    use ed25519_dalek::Signer;
    secret_key.sign(message).to_bytes()
}

/// Generate an Ed25519 keypair from OS randomness, for tests.
#[cfg(feature = "std")]
pub fn generate_keypair() -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    use ed25519_dalek::SigningKey;
    let mut rng = rand::rngs::OsRng;
    let signing_key = SigningKey::generate(&mut rng);
    let verifying_key = signing_key.verifying_key();
    (verifying_key, signing_key)
}
