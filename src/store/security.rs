use std::{
    path::PathBuf,
    process::{Command, Output},
};

use which::which;
use zeroize::Zeroizing;

use super::{CredentialStore, Error};

pub const PROGRAM: &str = "security";

/// Exit status `security` uses when the requested keychain item does not exist.
pub const ITEM_NOT_FOUND: i32 = 44;

pub fn find_program() -> Result<PathBuf, Error> {
    which(PROGRAM).map_err(|error| Error::ProgramNotFound {
        program: PROGRAM.to_string(),
        error,
    })
}

/// Generic password item in the login keychain, driven through the macOS
/// `security` utility.
pub struct SecurityCli {
    program: PathBuf,
    service: String,
    account: String,
}

impl SecurityCli {
    pub fn new(program: impl Into<PathBuf>, service: &str, account: &str) -> Self {
        SecurityCli {
            program: program.into(),
            service: service.to_string(),
            account: account.to_string(),
        }
    }

    fn run(&self, action: &'static str, extra: &[&str]) -> Result<Output, Error> {
        tracing::trace!("running {:?} {action}", self.program);
        Command::new(&self.program)
            .arg(action)
            .args(["-a", &self.account, "-s", &self.service])
            .args(extra)
            .output()
            .map_err(|error| Error::Spawn {
                program: self.program.clone(),
                error,
            })
    }

    fn failed(&self, action: &'static str, output: &Output) -> Error {
        Error::CommandFailed {
            program: self.program.clone(),
            action,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl CredentialStore for SecurityCli {
    fn read(&self) -> Result<Option<Zeroizing<String>>, Error> {
        let action = "find-generic-password";
        let output = self.run(action, &["-w"])?;
        if output.status.code() == Some(ITEM_NOT_FOUND) {
            return Ok(None);
        }
        if !output.status.success() {
            return Err(self.failed(action, &output));
        }
        let stdout = Zeroizing::new(output.stdout);
        let secret = Zeroizing::new(String::from_utf8(strip_newline(&stdout).to_vec())?);
        Ok(Some(decode_hex_output(&secret).unwrap_or(secret)))
    }

    fn write(&self, secret: &str) -> Result<(), Error> {
        let action = "add-generic-password";
        let output = self.run(action, &["-U", "-w", secret])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(self.failed(action, &output))
        }
    }

    fn clear(&self) -> Result<bool, Error> {
        let action = "delete-generic-password";
        let output = self.run(action, &[])?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(ITEM_NOT_FOUND) => Ok(false),
            _ => Err(self.failed(action, &output)),
        }
    }

    fn describe(&self) -> String {
        format!(
            "security (service {:?}, account {:?})",
            self.service, self.account
        )
    }
}

// `security -w` terminates the secret with a single newline.
fn strip_newline(stdout: &[u8]) -> &[u8] {
    stdout.strip_suffix(b"\n").unwrap_or(stdout)
}

/// `security -w` prints a secret as bare hex when it contains bytes it does
/// not consider printable, such as an embedded newline. Text that is valid
/// hex but decodes to printable characters only is taken literally, since
/// `security` would have printed that as is.
fn decode_hex_output(output: &str) -> Option<Zeroizing<String>> {
    if output.is_empty() || !output.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = Zeroizing::new(hex::decode(output).ok()?);
    let decoded = Zeroizing::new(String::from_utf8(bytes.to_vec()).ok()?);
    if decoded.chars().any(char::is_control) {
        tracing::trace!("decoded hex output of {PROGRAM}");
        Some(decoded)
    } else {
        None
    }
}
