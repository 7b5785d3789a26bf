//! Signing secret strength checks.
//!
//! Symmetric HS256 is only as strong as the secret, so the issuer
//! refuses to start with one that is short or low-entropy.

const MIN_SECRET_BYTES: usize = 32; // 256 bits
const STRONG_SECRET_BYTES: usize = 64;
const MIN_ENTROPY_BITS_PER_BYTE: f64 = 4.0;
const STRONG_ENTROPY_BITS_PER_BYTE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    /// Reject: too short or too predictable.
    Weak,
    Acceptable,
    Strong,
}

/// Classify a signing secret by length and Shannon entropy.
pub fn classify(secret: &str) -> SecretStrength {
    let bytes = secret.as_bytes();

    if bytes.len() < MIN_SECRET_BYTES {
        return SecretStrength::Weak;
    }

    let entropy = shannon_entropy(bytes);
    if entropy < MIN_ENTROPY_BITS_PER_BYTE {
        return SecretStrength::Weak;
    }

    if bytes.len() >= STRONG_SECRET_BYTES && entropy >= STRONG_ENTROPY_BITS_PER_BYTE {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

/// Shannon entropy in bits per byte (0..=8).
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut freq = [0u32; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
