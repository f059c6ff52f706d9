use crate::models::error::CodecError;

/// A password as entered for encryption, together with its confirmation.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordEntry {
    pub password: String,
    pub confirmation: String,
}

impl PasswordEntry {
    pub fn new(password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirmation: confirmation.into(),
        }
    }

    /// Entry for callers that have no separate confirmation field.
    pub fn confirmed(password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            confirmation: password.clone(),
            password,
        }
    }

    /// Enforce the minimum length (in characters) and confirmation match.
    ///
    /// Both fields are compared after trimming surrounding whitespace, and the
    /// trimmed password is what [`as_str`](Self::as_str) hands to the cipher.
    pub fn check(&self, min_len: usize) -> Result<(), CodecError> {
        let password = self.as_str();
        let len = password.chars().count();
        if len < min_len {
            return Err(CodecError::PasswordPolicyViolation(format!(
                "password must be at least {min_len} characters, got {len}"
            )));
        }
        if password != self.confirmation.trim() {
            return Err(CodecError::PasswordPolicyViolation("passwords do not match".into()));
        }
        Ok(())
    }

    /// The password as used for key derivation: surrounding whitespace removed.
    pub fn as_str(&self) -> &str {
        self.password.trim()
    }
}

// Never print the secret.
impl std::fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordEntry").finish_non_exhaustive()
    }
}
