use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Required length of an account id on sign-up
pub const ACCOUNT_ID_LEN: usize = 12;

/// Required length of a phone number on sign-up
pub const PHONE_LEN: usize = 10;

/// Account entity - represents a user stored in MongoDB
///
/// The password is kept in plain text and compared by equality.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub division: String,
    pub division_code: String,
    /// Lookup key for sign-in and update
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .field("division", &self.division)
            .field("division_code", &self.division_code)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Candidate record submitted on sign-up
///
/// Every field is optional on the wire so that each missing field maps to
/// its own rejection instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// 12 character account id
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    /// 10 character phone number
    pub phone: Option<String>,
    pub division: Option<String>,
    pub division_code: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Partial record submitted on update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub division: Option<String>,
    pub division_code: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Sign-in credentials passed as query parameters
#[derive(Clone, Deserialize, ToSchema, IntoParams)]
pub struct SignInQuery {
    pub email: String,
    pub password: String,
}

/// Reason a sign-up or update was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    MissingId,
    InvalidIdLength,
    MissingName,
    MissingAddress,
    MissingPhone,
    InvalidPhoneLength,
    MissingDivision,
    MissingDivisionCode,
    MissingPassword,
    MissingPasswordPair,
    PasswordMismatch,
    MissingEmail,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::MissingId => "User id cannot be null.",
            Rejection::InvalidIdLength => "User id must be 12 characters long.",
            Rejection::MissingName => "User name cannot be null.",
            Rejection::MissingAddress => "User address cannot be null.",
            Rejection::MissingPhone => "User phone cannot be null.",
            Rejection::InvalidPhoneLength => "User phone must be 10 characters long.",
            Rejection::MissingDivision => "User division cannot be null.",
            Rejection::MissingDivisionCode => "User division code cannot be null.",
            Rejection::MissingPassword => "User password cannot be null.",
            Rejection::MissingPasswordPair => {
                "User password and confirm password cannot be null."
            }
            Rejection::PasswordMismatch => "User password and confirm password do not match.",
            Rejection::MissingEmail => "User email cannot be null.",
        };
        f.write_str(msg)
    }
}

/// Machine-readable kind of an [`AuthOutcome`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    SignedIn,
    SignedUp,
    Updated,
    NotFound,
    IncorrectPassword,
    AlreadyExists,
    Rejected,
}

/// Result of a sign-in, sign-up or update call.
///
/// Outcomes are normal return values: a rejected sign-up is not an error.
/// `Display` renders the human-readable message returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn { email: String },
    SignedUp { email: String },
    Updated { email: String },
    NotFound { email: String },
    IncorrectPassword,
    AlreadyExists { email: String },
    Rejected(Rejection),
}

impl AuthOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            AuthOutcome::SignedIn { .. } => OutcomeKind::SignedIn,
            AuthOutcome::SignedUp { .. } => OutcomeKind::SignedUp,
            AuthOutcome::Updated { .. } => OutcomeKind::Updated,
            AuthOutcome::NotFound { .. } => OutcomeKind::NotFound,
            AuthOutcome::IncorrectPassword => OutcomeKind::IncorrectPassword,
            AuthOutcome::AlreadyExists { .. } => OutcomeKind::AlreadyExists,
            AuthOutcome::Rejected(_) => OutcomeKind::Rejected,
        }
    }

    /// Whether the operation took effect
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            AuthOutcome::SignedIn { .. } | AuthOutcome::SignedUp { .. } | AuthOutcome::Updated { .. }
        )
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AuthOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOutcome::SignedIn { email } => {
                write!(f, "User with email {email} signed in successfully.")
            }
            AuthOutcome::SignedUp { email } => {
                write!(f, "User with email {email} signed up successfully.")
            }
            AuthOutcome::Updated { email } => {
                write!(f, "User with email {email} updated successfully.")
            }
            AuthOutcome::NotFound { email } => write!(f, "User with email {email} not found."),
            AuthOutcome::IncorrectPassword => f.write_str("Incorrect password."),
            AuthOutcome::AlreadyExists { email } => {
                write!(f, "User with email {email} already exists.")
            }
            AuthOutcome::Rejected(reason) => reason.fmt(f),
        }
    }
}

impl From<Rejection> for AuthOutcome {
    fn from(reason: Rejection) -> Self {
        AuthOutcome::Rejected(reason)
    }
}

/// Response body for every account endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
    pub message: String,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            outcome: outcome.kind(),
            reason: outcome.rejection(),
            message: outcome.to_string(),
        }
    }
}

impl NewAccount {
    /// Run the sign-up field checks in order and build the record to persist.
    ///
    /// The email is the lookup key for sign-in and update, so a candidate
    /// that passes every other check still needs one before it is stored.
    pub fn into_account(self) -> Result<Account, Rejection> {
        let id = self.id.ok_or(Rejection::MissingId)?;
        if id.chars().count() != ACCOUNT_ID_LEN {
            return Err(Rejection::InvalidIdLength);
        }
        let name = self.name.ok_or(Rejection::MissingName)?;
        let address = self.address.ok_or(Rejection::MissingAddress)?;
        let phone = self.phone.ok_or(Rejection::MissingPhone)?;
        if phone.chars().count() != PHONE_LEN {
            return Err(Rejection::InvalidPhoneLength);
        }
        let division = self.division.ok_or(Rejection::MissingDivision)?;
        let division_code = self.division_code.ok_or(Rejection::MissingDivisionCode)?;
        let password = self.password.ok_or(Rejection::MissingPassword)?;
        let confirm_password = self
            .confirm_password
            .ok_or(Rejection::MissingPasswordPair)?;
        if password != confirm_password {
            return Err(Rejection::PasswordMismatch);
        }
        let email = self.email.ok_or(Rejection::MissingEmail)?;

        Ok(Account {
            id,
            name,
            address,
            phone,
            division,
            division_code,
            email,
            password,
        })
    }
}

impl Account {
    /// Apply updates from an AccountUpdate.
    ///
    /// Profile fields are copied without re-validation. The password only
    /// changes when both it and its confirmation are present; a mismatch
    /// returns an error and the caller must discard this record.
    pub fn apply_update(&mut self, update: AccountUpdate) -> Result<(), Rejection> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(division) = update.division {
            self.division = division;
        }
        if let Some(division_code) = update.division_code {
            self.division_code = division_code;
        }
        if let (Some(password), Some(confirm)) = (update.password, update.confirm_password) {
            if password != confirm {
                return Err(Rejection::PasswordMismatch);
            }
            self.password = password;
        }
        Ok(())
    }
}
