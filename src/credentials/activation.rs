// Activation record and email validation

/// One activation outcome: the email the user supplied and whether it
/// passed validation. Immutable; re-activating builds a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    email: Option<String>,
    valid: bool,
}

impl Activation {
    /// The validated email. `None` when validation rejected the input.
    /// An empty string means the user opted out of giving an address.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn accepted(email: String) -> Self {
        Self {
            email: Some(email),
            valid: true,
        }
    }

    fn rejected() -> Self {
        Self {
            email: None,
            valid: false,
        }
    }
}

/// Validate a candidate email.
///
/// The candidate is trimmed. It is accepted when it is empty (the user
/// chose not to give one) or when it contains exactly one `@`. Nothing
/// else about the format is checked.
pub fn validate_email(candidate: &str) -> Activation {
    let email = candidate.trim();

    if !email.is_empty() && email.matches('@').count() != 1 {
        tracing::debug!("Rejected email: expected exactly one '@'");
        return Activation::rejected();
    }

    Activation::accepted(email.to_string())
}
