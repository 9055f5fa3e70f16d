use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::core::types::{ClientSecret, DeviceCode, GrantKey, UserCode};

pub trait FromRandom {
    fn from_random() -> Self;
}

impl FromRandom for ClientSecret {
    fn from_random() -> Self {
        ClientSecret(random_string(32))
    }
}

impl FromRandom for GrantKey {
    fn from_random() -> Self {
        GrantKey(random_string(64))
    }
}

impl FromRandom for DeviceCode {
    fn from_random() -> Self {
        DeviceCode(random_string(64))
    }
}

/// Nine digits, easy to type on a second device.
impl FromRandom for UserCode {
    fn from_random() -> Self {
        let mut rng = rand::thread_rng();
        UserCode((0..9).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect())
    }
}

pub fn random_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_strings_are_alphanumeric() {
        let s = random_string(40);
        assert_eq!(s.len(), 40);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(s, random_string(40));
    }

    #[test]
    fn user_codes_are_numeric() {
        let code = UserCode::from_random();
        assert_eq!(code.0.len(), 9);
        assert!(code.0.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn secrets_and_keys_have_fixed_lengths() {
        assert_eq!(ClientSecret::from_random().0.len(), 32);
        assert_eq!(GrantKey::from_random().0.len(), 64);
        assert_eq!(DeviceCode::from_random().0.len(), 64);
    }
}
