use rand::{Rng, distr::Alphanumeric};

const TOKEN_LENGTH: usize = 32;

/// Single-use token mailed to a new account to prove ownership of the
/// registered address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    pub fn generate() -> Self {
        let token = rand::rng()
            .sample_iter(Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConfirmationToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_alphanumeric_and_fixed_length() {
        let token = ConfirmationToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(token.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_are_unique_enough() {
        let a = ConfirmationToken::generate();
        let b = ConfirmationToken::generate();
        assert_ne!(a, b);
    }
}
