use std::fmt;

use thiserror::Error;

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Remote service errors ---
    #[error("Invalid master password")]
    AuthRejected,

    #[error("Failed to connect to server: {0}")]
    NetworkFailure(String),

    #[error("Server rejected the request (HTTP {0})")]
    RemoteRejected(u16),

    /// A failure tagged with the user-facing operation it interrupted.
    ///
    /// `Display` is the single human-readable message shown to the user.
    #[error("{}", .op.failure_message(.source))]
    Failed {
        op: Operation,
        #[source]
        source: Box<PwVaultError>,
    },

    // --- Auth state errors ---
    #[error("Not logged in; run `pwvault login` first")]
    NotAuthenticated,

    #[error("Already logged in; log out before logging in again")]
    AlreadyAuthenticated,

    #[error("Master password cannot be empty")]
    EmptyMasterPassword,

    // --- Session storage errors ---
    #[error("Stored session is unreadable: {0}")]
    InvalidSession(String),

    #[error("Session storage error: {0}")]
    SessionStorage(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    /// A failure already turned into its user-facing message.
    #[error("{0}")]
    Reported(String),
}

impl PwVaultError {
    /// Tag this error with the operation it interrupted.
    ///
    /// Errors that are already tagged keep their original operation, so a
    /// reload failing inside an add still reads "Failed to fetch passwords".
    pub fn during(self, op: Operation) -> Self {
        match self {
            Self::Failed { .. } => self,
            other => Self::Failed {
                op,
                source: Box::new(other),
            },
        }
    }

    /// The untagged error underneath any `Failed` wrappers.
    pub fn root(&self) -> &PwVaultError {
        match self {
            Self::Failed { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for transport-level failures (no HTTP response at all).
    pub fn is_network(&self) -> bool {
        matches!(self.root(), Self::NetworkFailure(_))
    }
}

/// User-facing operations whose failures end up in the error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    FetchCredentials,
    FetchCategories,
    AddCredential,
    DeleteCredential,
    AddCategory,
    GeneratePassword,
}

impl Operation {
    /// The message shown to the user when this operation fails with `err`.
    pub fn failure_message(self, err: &PwVaultError) -> &'static str {
        match self {
            Self::Login if err.is_network() => "Failed to connect to server",
            Self::Login => "Invalid master password",
            Self::FetchCredentials => "Failed to fetch passwords",
            Self::FetchCategories => "Failed to fetch categories",
            Self::AddCredential => "Failed to add password",
            Self::DeleteCredential => "Failed to delete password",
            Self::AddCategory => "Failed to add category",
            Self::GeneratePassword => "Failed to generate password",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::FetchCredentials => "fetch-credentials",
            Self::FetchCategories => "fetch-categories",
            Self::AddCredential => "add-credential",
            Self::DeleteCredential => "delete-credential",
            Self::AddCategory => "add-category",
            Self::GeneratePassword => "generate-password",
        };
        f.write_str(name)
    }
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;

/// The single slot holding the most recent user-facing error message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorSlot(Option<String>);

impl ErrorSlot {
    /// Store the human-readable message for `err`, replacing any previous one.
    pub fn record(&mut self, err: &PwVaultError) {
        self.0 = Some(err.to_string());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_messages_distinguish_rejection_from_network() {
        let rejected = PwVaultError::AuthRejected.during(Operation::Login);
        assert_eq!(rejected.to_string(), "Invalid master password");

        let offline =
            PwVaultError::NetworkFailure("connection refused".into()).during(Operation::Login);
        assert_eq!(offline.to_string(), "Failed to connect to server");
    }

    #[test]
    fn remote_rejection_on_mutation_uses_operation_message() {
        let err = PwVaultError::RemoteRejected(500).during(Operation::AddCredential);
        assert_eq!(err.to_string(), "Failed to add password");
        assert!(matches!(err.root(), PwVaultError::RemoteRejected(500)));
    }

    #[test]
    fn first_tag_wins() {
        let err = PwVaultError::RemoteRejected(401)
            .during(Operation::FetchCredentials)
            .during(Operation::AddCredential);
        assert_eq!(err.to_string(), "Failed to fetch passwords");
    }

    #[test]
    fn error_slot_records_and_clears() {
        let mut slot = ErrorSlot::default();
        assert_eq!(slot.message(), None);

        slot.record(&PwVaultError::RemoteRejected(404).during(Operation::DeleteCredential));
        assert_eq!(slot.message(), Some("Failed to delete password"));

        slot.clear();
        assert_eq!(slot.message(), None);
    }
}
