//! Account aggregate and its value types.
//!
//! An account owns at most one active run. The link is modelled as an
//! explicit [`ActiveRunSlot`] so the "no run" case cannot be confused with a
//! missing record.

use std::fmt;

use uuid::Uuid;

use crate::domain::runs::ActiveRunId;

/// Maximum accepted length of an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum accepted length of a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validation errors returned by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like local@domain without whitespace")]
    MalformedEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("credential must not be empty")]
    EmptyCredential,
}

impl AccountValidationError {
    /// Request field the failure applies to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::MalformedEmail | Self::EmailTooLong { .. } => "email",
            Self::EmptyDisplayName | Self::DisplayNameTooLong { .. } => "name",
            Self::EmptyCredential => "password",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::EmptyDisplayName | Self::EmptyCredential => "empty",
            Self::MalformedEmail => "malformed",
            Self::EmailTooLong { .. } | Self::DisplayNameTooLong { .. } => "too_long",
        }
    }
}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address acting as the immutable business key of an account.
///
/// Surrounding whitespace is trimmed; otherwise the address is kept as given.
///
/// # Examples
/// ```
/// use running_late::domain::Email;
///
/// let email = Email::new(" a@x.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "a@x.com");
/// assert!(Email::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if value.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::MalformedEmail);
        }
        match value.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(value.to_owned()))
            }
            _ => Err(AccountValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human readable account name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if value.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque credential stored exactly as supplied.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a non-empty credential.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let value = raw.into();
        if value.is_empty() {
            return Err(AccountValidationError::EmptyCredential);
        }
        Ok(Self(value))
    }

    /// Expose the stored value to persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Whether an account currently owns an active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveRunSlot {
    #[default]
    Idle,
    Occupied(ActiveRunId),
}

impl ActiveRunSlot {
    /// Build a slot from a nullable run identifier.
    pub fn from_option(run_id: Option<ActiveRunId>) -> Self {
        run_id.map_or(Self::Idle, Self::Occupied)
    }

    /// Identifier of the occupying run, if any.
    pub fn run_id(&self) -> Option<ActiveRunId> {
        match self {
            Self::Idle => None,
            Self::Occupied(id) => Some(*id),
        }
    }

    /// Return `true` when no run is linked.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `email` is unique across accounts and never changes.
/// - `active_run` is `Occupied(id)` exactly when an active run with `id` is
///   owned by this account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    display_name: DisplayName,
    credential: Credential,
    active_run: ActiveRunSlot,
}

impl Account {
    /// Create a fresh account with an idle run slot.
    pub fn register(email: Email, display_name: DisplayName, credential: Credential) -> Self {
        Self::new(
            AccountId::random(),
            email,
            display_name,
            credential,
            ActiveRunSlot::Idle,
        )
    }

    /// Rehydrate an account from stored parts.
    pub fn new(
        id: AccountId,
        email: Email,
        display_name: DisplayName,
        credential: Credential,
        active_run: ActiveRunSlot,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            credential,
            active_run,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn active_run(&self) -> ActiveRunSlot {
        self.active_run
    }

    /// Return a copy with the run slot replaced.
    #[must_use]
    pub fn with_active_run(mut self, slot: ActiveRunSlot) -> Self {
        self.active_run = slot;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com")]
    #[case("  runner@example.org  ")]
    #[case("first.last+tag@sub.example.co.uk")]
    fn accepts_plausible_emails(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("   ", AccountValidationError::EmptyEmail)]
    #[case("no-at-sign", AccountValidationError::MalformedEmail)]
    #[case("@x.com", AccountValidationError::MalformedEmail)]
    #[case("a@", AccountValidationError::MalformedEmail)]
    #[case("a@b@c", AccountValidationError::MalformedEmail)]
    #[case("a b@x.com", AccountValidationError::MalformedEmail)]
    fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_display_names() {
        let raw = "x".repeat(DISPLAY_NAME_MAX + 1);
        let err = DisplayName::new(raw).expect_err("too long");
        assert_eq!(err.field(), "name");
        assert_eq!(err.code(), "too_long");
    }

    #[rstest]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("hunter2").expect("non-empty");
        assert!(!format!("{credential:?}").contains("hunter2"));
        assert_eq!(credential.expose(), "hunter2");
    }

    #[rstest]
    fn registered_accounts_start_idle() {
        let account = Account::register(
            Email::new("a@x.com").expect("email"),
            DisplayName::new("Ada").expect("name"),
            Credential::new("secret").expect("credential"),
        );
        assert!(account.active_run().is_idle());
    }

    #[rstest]
    fn slot_round_trips_through_option() {
        let run_id = ActiveRunId::random();
        assert_eq!(
            ActiveRunSlot::from_option(Some(run_id)),
            ActiveRunSlot::Occupied(run_id)
        );
        assert_eq!(ActiveRunSlot::from_option(None), ActiveRunSlot::Idle);
        assert_eq!(ActiveRunSlot::Occupied(run_id).run_id(), Some(run_id));
    }
}
