// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer name cannot be empty")]
    EmptyName,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("This email is already used")]
    EmailAlreadyUsed,

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl CustomerError {
    /// True for business rule violations, false for store failures
    pub fn is_application_error(&self) -> bool {
        !matches!(self, CustomerError::Repository(_))
    }
}
