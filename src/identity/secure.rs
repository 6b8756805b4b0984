//! Secret wrappers that are zeroized on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that zeroizes its contents on drop and never prints them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_debug() {
        let secret = SecureString::new("super_secret_token".to_string());
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "[REDACTED]");
        assert!(!debug_output.contains("super_secret"));
    }

    #[test]
    fn test_secure_string_access() {
        let secret = SecureString::from("my_token");
        assert_eq!(secret.as_str(), "my_token");
    }
}
