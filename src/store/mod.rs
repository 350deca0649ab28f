use std::{io, path::PathBuf};

use zeroize::Zeroizing;

use crate::commands::HEADING_STORE;

#[cfg(feature = "additional-libs")]
pub mod keyring;
#[cfg(test)]
pub mod memory;
pub mod security;

/// Service name the managed application stores its credentials under.
pub const DEFAULT_SERVICE: &str = "cli-credentials";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[cfg(feature = "additional-libs")]
    #[error(transparent)]
    Keyring(#[from] ::keyring::Error),

    #[error("cannot find the `{program}` utility on PATH: {error}")]
    ProgramNotFound { program: String, error: which::Error },

    #[error("failed to run {program:?}: {error}")]
    Spawn { program: PathBuf, error: io::Error },

    #[error("{program:?} {action} exited with status {code}: {stderr}")]
    CommandFailed {
        program: PathBuf,
        action: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("credential store returned data that is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("keyring credential store is not available: additional-libs feature must be enabled")]
    FeatureNotEnabled,
}

/// The single credential slot this tool manages: one secret for the
/// configured (account, service) pair.
pub trait CredentialStore {
    /// Current secret, or `None` when no entry is set.
    fn read(&self) -> Result<Option<Zeroizing<String>>, Error>;

    /// Store `secret`, overwriting any existing entry.
    fn write(&self, secret: &str) -> Result<(), Error>;

    /// Remove the entry. Returns whether there was one.
    fn clear(&self) -> Result<bool, Error>;

    /// Human readable description used by `status`.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// macOS `security` command line utility
    Security,
    /// Platform native store through the keyring library
    Keyring,
}

impl Backend {
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Backend::Security
        } else {
            Backend::Keyring
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Backend::Security => "security",
            Backend::Keyring => "keyring",
        })
    }
}

#[derive(Debug, clap::Args, Clone)]
#[group(skip)]
pub struct Args {
    /// Credential store backend
    #[arg(
        long,
        value_enum,
        global = true,
        env = "ACCOUNT_SWITCH_BACKEND",
        default_value_t = Backend::native(),
        help_heading = HEADING_STORE,
    )]
    pub backend: Backend,

    /// Service name the credentials are stored under
    #[arg(
        long,
        global = true,
        env = "ACCOUNT_SWITCH_SERVICE",
        default_value = DEFAULT_SERVICE,
        help_heading = HEADING_STORE,
    )]
    pub service: String,

    /// Account the credentials are stored under. Defaults to the current user
    #[arg(long, global = true, env = "ACCOUNT_SWITCH_ACCOUNT", help_heading = HEADING_STORE)]
    pub account: Option<String>,

    /// Path to the `security` utility, if not the one found on PATH
    #[arg(long, global = true, env = "ACCOUNT_SWITCH_SECURITY_BIN", help_heading = HEADING_STORE)]
    pub security_bin: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            backend: Backend::native(),
            service: DEFAULT_SERVICE.to_string(),
            account: None,
            security_bin: None,
        }
    }
}

impl Args {
    pub fn account(&self) -> String {
        self.account.clone().unwrap_or_else(whoami::username)
    }

    pub fn open(&self) -> Result<Box<dyn CredentialStore>, Error> {
        let account = self.account();
        tracing::debug!(
            "opening {} credential store for service {:?}, account {account:?}",
            self.backend,
            self.service
        );
        match self.backend {
            Backend::Security => {
                let program = match &self.security_bin {
                    Some(path) => path.clone(),
                    None => security::find_program()?,
                };
                Ok(Box::new(security::SecurityCli::new(
                    program,
                    &self.service,
                    &account,
                )))
            }
            Backend::Keyring => open_keyring(&self.service, &account),
        }
    }
}

#[cfg(feature = "additional-libs")]
fn open_keyring(service: &str, account: &str) -> Result<Box<dyn CredentialStore>, Error> {
    Ok(Box::new(keyring::KeyringStore::new(service, account)?))
}

#[cfg(not(feature = "additional-libs"))]
fn open_keyring(_service: &str, _account: &str) -> Result<Box<dyn CredentialStore>, Error> {
    Err(Error::FeatureNotEnabled)
}
