use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Not a valid email address")]
    InvalidEmail,
}

/// Problems with user input detected before anything is sent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password is required")]
    EmptyPassword,
    #[error("Invalid email: {0}")]
    Email(#[from] ConversionError),
}
