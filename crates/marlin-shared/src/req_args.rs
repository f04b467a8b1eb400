//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! For example `/admin/user-profiles` maps to
//! [`admin::user_profiles::UserProfileFilters`]. Args holding secrets are not
//! serializable and get converted on the way out

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::{errors::FormError, uac::Email};

pub mod admin;
pub mod location;
pub mod user_profile;

#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: Email,
    pub password: SecretString,
    pub remember_me: bool,
}

impl LoginReqArgs {
    pub fn new(email: Email, password: SecretString) -> Self {
        Self {
            email,
            password,
            remember_me: false,
        }
    }

    pub fn remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Creates an account. Used for self registration and by admins creating
/// users
#[derive(Clone)]
pub struct RegisterReqArgs {
    pub email: Email,
    pub password: SecretString,
}

impl RegisterReqArgs {
    /// Validates the form input before anything is sent to the server
    pub fn try_new(
        email: &str,
        password: SecretString,
        password_check: &SecretString,
    ) -> Result<Self, FormError> {
        let email = Email::try_from(email)?;
        if password.expose_secret().is_empty() {
            return Err(FormError::EmptyPassword);
        }
        if password.expose_secret() != password_check.expose_secret() {
            return Err(FormError::PasswordMismatch);
        }
        Ok(Self { email, password })
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::errors::ConversionError;

    #[rstest]
    #[case::mismatch("a@b.c", "one", "two", FormError::PasswordMismatch)]
    #[case::empty("a@b.c", "", "", FormError::EmptyPassword)]
    #[case::bad_email("nope", "pw", "pw", FormError::Email(ConversionError::InvalidEmail))]
    fn register_form_rejected(
        #[case] email: &str,
        #[case] password: &str,
        #[case] check: &str,
        #[case] expected: FormError,
    ) {
        // Act
        let actual = RegisterReqArgs::try_new(email, password.to_string().into(), &check.to_string().into());

        // Assert
        assert_eq!(actual.unwrap_err(), expected);
    }

    #[test]
    fn register_form_accepted() {
        let actual = RegisterReqArgs::try_new(
            "new@marlin-live.com",
            "pw".to_string().into(),
            &"pw".to_string().into(),
        );
        assert_eq!(actual.unwrap().email.as_ref(), "new@marlin-live.com");
    }

    #[test]
    fn debug_hides_password() {
        let args = LoginReqArgs::new("a@b.c".try_into().unwrap(), "hunter2".to_string().into());
        let debug = format!("{args:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("has_password: true"));
    }
}
