//! Authentication primitives: credentials, passwords and account commands.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Minimum allowed password length for new passwords.
pub const PASSWORD_MIN: usize = 6;
/// Maximum allowed password length for new passwords.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Username failed validation.
    InvalidUsername(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// New password shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
    /// New password longer than [`PASSWORD_MAX`].
    PasswordTooLong { max: usize },
}

impl CredentialsValidationError {
    /// Request field the failure relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "email",
            Self::InvalidUsername(_) => "username",
            Self::EmptyPassword | Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => {
                "password"
            }
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) | Self::InvalidUsername(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Plaintext password held in zeroising memory.
///
/// Constructed either as a new password (length-checked) or as a submitted
/// password (non-empty only, so existing accounts can always log in).
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a password chosen by the user.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::Password;
    ///
    /// assert!(Password::new_secret("secret").is_ok());
    /// assert!(Password::new_secret("short").is_err());
    /// ```
    pub fn new_secret(raw: &str) -> Result<Self, CredentialsValidationError> {
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(CredentialsValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Accept a password submitted for verification.
    pub fn submitted(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext, for hashing or verification only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is a normalised [`EmailAddress`].
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use calculator_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = EmailAddress::new(email).map_err(CredentialsValidationError::InvalidEmail)?;
        let password = Password::submitted(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Password,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)
                .map_err(CredentialsValidationError::InvalidUsername)?,
            email: EmailAddress::new(email).map_err(CredentialsValidationError::InvalidEmail)?,
            password: Password::new_secret(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
}

impl ProfileUpdate {
    /// Validate whichever raw fields were supplied.
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let username = username
            .map(Username::new)
            .transpose()
            .map_err(CredentialsValidationError::InvalidUsername)?;
        let email = email
            .map(EmailAddress::new)
            .transpose()
            .map_err(CredentialsValidationError::InvalidEmail)?;
        Ok(Self { username, email })
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Password change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    old_password: Password,
    new_password: Password,
}

impl PasswordChange {
    /// Validate the current password (non-empty) and the new one (length rules).
    pub fn try_from_parts(
        old_password: &str,
        new_password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            old_password: Password::submitted(old_password)?,
            new_password: Password::new_secret(new_password)?,
        })
    }

    pub fn old_password(&self) -> &Password {
        &self.old_password
    }

    pub fn new_password(&self) -> &Password {
        &self.new_password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", "email")]
    #[case("not-an-email", "pw", "email")]
    #[case("ada@example.com", "", "password")]
    fn invalid_credentials(#[case] email: &str, #[case] password: &str, #[case] field: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn login_password_is_not_length_checked() {
        let creds = LoginCredentials::try_from_parts(" ada@example.com ", " pw ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), "ada@example.com");
        assert_eq!(creds.password().expose(), " pw ");
    }

    #[rstest]
    #[case("12345", CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN })]
    #[case(&"x".repeat(PASSWORD_MAX + 1), CredentialsValidationError::PasswordTooLong { max: PASSWORD_MAX })]
    fn new_passwords_enforce_length(
        #[case] raw: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        assert_eq!(Password::new_secret(raw).expect_err("length"), expected);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new_secret("hunter22").expect("valid");
        assert_eq!(format!("{password:?}"), "Password(..)");
    }

    #[rstest]
    #[case("ab", "ada@example.com", "secret", "username")]
    #[case("ada", "bad", "secret", "email")]
    #[case("ada", "ada@example.com", "short", "password")]
    fn registration_reports_offending_field(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(username, email, password).expect_err("invalid");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn profile_update_accepts_partial_input() {
        let update = ProfileUpdate::try_from_parts(None, Some("new@example.com")).expect("valid");
        assert!(update.username.is_none());
        assert_eq!(
            update.email.as_ref().map(AsRef::as_ref),
            Some("new@example.com")
        );
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[rstest]
    fn password_change_validates_new_password_only() {
        assert!(PasswordChange::try_from_parts("x", "newsecret").is_ok());
        let err = PasswordChange::try_from_parts("oldsecret", "new").expect_err("too short");
        assert_eq!(err.field(), "password");
        let err = PasswordChange::try_from_parts("", "newsecret").expect_err("blank old");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }
}
