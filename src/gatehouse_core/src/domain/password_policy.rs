/// Composition rules applied to new passwords at registration.
///
/// Only registration consults the policy. Login accepts whatever was valid
/// when the account was created, so tightening the policy never locks
/// existing accounts out.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

impl PasswordPolicy {
    /// Checks `candidate` against every rule and returns all violations,
    /// not just the first, so a caller can report them in one response.
    pub fn violations(&self, candidate: &str) -> Vec<PasswordRuleViolation> {
        let mut violations = Vec::new();
        let length = candidate.chars().count();

        if length < self.min_length {
            violations.push(PasswordRuleViolation::TooShort {
                min: self.min_length,
            });
        }
        if length > self.max_length {
            violations.push(PasswordRuleViolation::TooLong {
                max: self.max_length,
            });
        }
        if self.require_uppercase && !candidate.chars().any(|c| c.is_uppercase()) {
            violations.push(PasswordRuleViolation::MissingUppercase);
        }
        if self.require_lowercase && !candidate.chars().any(|c| c.is_lowercase()) {
            violations.push(PasswordRuleViolation::MissingLowercase);
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordRuleViolation::MissingDigit);
        }
        if self.require_special && candidate.chars().all(|c| c.is_alphanumeric()) {
            violations.push(PasswordRuleViolation::MissingSpecial);
        }

        violations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordRuleViolation {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("password must be at most {max} characters")]
    TooLong { max: usize },
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    #[error("password must contain a lowercase letter")]
    MissingLowercase,
    #[error("password must contain a digit")]
    MissingDigit,
    #[error("password must contain a non-alphanumeric character")]
    MissingSpecial,
}
