use sha2::{Digest, Sha256};

use crate::core::types::{ClientSecret, HashedClientSecret};

pub trait HashTo: AsRef<str> {
    type HashedType;
}

impl HashTo for ClientSecret {
    type HashedType = HashedClientSecret;
}

/// Base64 of the SHA-256 digest, the form shared secrets are stored in.
pub fn sha256<T, H>(to_hash: &T) -> H
where
    T: HashTo<HashedType = H>,
    H: From<String>,
{
    let digest = Sha256::digest(to_hash.as_ref().as_bytes());
    base64::encode(digest).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_to_base64_sha256() {
        let hashed: HashedClientSecret = sha256(&ClientSecret("secret".to_string()));
        assert_eq!(hashed.0, "K7gNU3sdo+OL0wNhqoVWhr3g6s1xYv72ol/pe/Unols=");
    }

    #[test]
    fn hashing_is_case_sensitive() {
        let lower: HashedClientSecret = sha256(&ClientSecret("secret".to_string()));
        let upper: HashedClientSecret = sha256(&ClientSecret("Secret".to_string()));
        assert_ne!(lower, upper);
    }
}
