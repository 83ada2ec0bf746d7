use sha2::{Digest, Sha256};

/// Pseudo-identifier for a candidate: hex SHA-256 of `email` followed by `phone`.
///
/// Unsalted and deterministic, so anyone holding the contact details can recompute it.
/// It links submissions from the same person; it does not protect the inputs.
pub fn anonymize(email: &str, phone: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(phone.as_bytes());
    format!("{:x}", hasher.finalize())
}
