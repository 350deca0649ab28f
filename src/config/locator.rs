use directories::UserDirs;
use std::{
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use zeroize::Zeroizing;

use crate::{
    commands::HEADING_GLOBAL,
    profile::{metadata::Metadata, name::ProfileName},
};

pub const CONFIG_DIR_NAME: &str = "account-switch";
pub const METADATA_FILE: &str = "profiles.json";
pub const CURRENT_FILE: &str = "current";
pub const PROFILES_DIR: &str = "profiles";
pub const CREDENTIAL_EXTENSION: &str = "cred";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to find home directory")]
    HomeDirNotFound,
    #[error("XDG_CONFIG_HOME env variable is not a valid path. Got {0}")]
    XdgConfigHome(String),
    #[error("Failed to create directory {path}: {error}")]
    DirCreationFailed { path: PathBuf, error: io::Error },
    #[error("Failed to read file {path}: {error}")]
    FileRead { path: PathBuf, error: io::Error },
    #[error("Failed to write file {path}: {error}")]
    FileWrite { path: PathBuf, error: io::Error },
    #[error("Failed to remove file {path}: {error}")]
    FileRemoval { path: PathBuf, error: io::Error },
    #[error("Metadata file {path} is not valid JSON: {error}")]
    MetadataDeserialization {
        path: PathBuf,
        error: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, clap::Args, Default, Clone)]
#[group(skip)]
pub struct Args {
    /// Directory holding saved profiles. Default is "$XDG_CONFIG_HOME/account-switch" or "~/.config/account-switch"
    #[arg(long, global = true, env = "ACCOUNT_SWITCH_HOME", help_heading = HEADING_GLOBAL)]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    pub fn config_dir(&self) -> Result<PathBuf, Error> {
        self.config_dir
            .as_ref()
            .map_or_else(global_config_path, |dir| Ok(dir.clone()))
    }

    pub fn locator(&self) -> Result<Locator, Error> {
        Ok(Locator::new(self.config_dir()?))
    }
}

/// Resolves and manipulates the files of one profile directory:
///
/// ```text
/// <root>/profiles.json      metadata index
/// <root>/current            name of the active profile, empty when logged out
/// <root>/profiles/<name>.cred
/// ```
#[derive(Debug, Clone)]
pub struct Locator {
    root: PathBuf,
}

impl Locator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Locator { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    pub fn current_file(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }

    pub fn credential_file(&self, name: &ProfileName) -> PathBuf {
        let mut path = self.profiles_dir().join(name.as_ref());
        path.set_extension(CREDENTIAL_EXTENSION);
        path
    }

    /// Create the root and profiles directories, restricting both to the owner.
    pub fn ensure_dirs(&self) -> Result<(), Error> {
        for dir in [self.root.clone(), self.profiles_dir()] {
            create_private_dir(&dir)?;
        }
        Ok(())
    }

    pub fn read_metadata(&self) -> Result<Metadata, Error> {
        let path = self.metadata_file();
        let Some(data) = read_optional(&path)? else {
            return Ok(Metadata::default());
        };
        if data.trim().is_empty() {
            return Ok(Metadata::default());
        }
        serde_json::from_str(&data).map_err(|error| Error::MetadataDeserialization { path, error })
    }

    pub fn write_metadata(&self, metadata: &Metadata) -> Result<(), Error> {
        self.ensure_dirs()?;
        let data = serde_json::to_string_pretty(metadata)?;
        write_private(&self.metadata_file(), data.as_bytes())
    }

    /// Name recorded in the pointer file. The content is only trimmed, not
    /// validated, so a hand-edited pointer is returned as is.
    pub fn read_current(&self) -> Result<Option<String>, Error> {
        Ok(read_optional(&self.current_file())?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn write_current(&self, name: Option<&ProfileName>) -> Result<(), Error> {
        self.ensure_dirs()?;
        let data = name.map(ToString::to_string).unwrap_or_default();
        write_private(&self.current_file(), data.as_bytes())
    }

    pub fn has_credential(&self, name: &ProfileName) -> bool {
        self.credential_file(name).is_file()
    }

    pub fn read_credential(&self, name: &ProfileName) -> Result<Zeroizing<String>, Error> {
        let path = self.credential_file(name);
        tracing::debug!("reading credentials from {path:?}");
        fs::read_to_string(&path)
            .map(Zeroizing::new)
            .map_err(|error| Error::FileRead { path, error })
    }

    pub fn write_credential(&self, name: &ProfileName, blob: &str) -> Result<PathBuf, Error> {
        self.ensure_dirs()?;
        let path = self.credential_file(name);
        tracing::debug!("writing credentials to {path:?}");
        write_private(&path, blob.as_bytes())?;
        Ok(path)
    }

    /// Returns whether a credential file was removed.
    pub fn remove_credential(&self, name: &ProfileName) -> Result<bool, Error> {
        let path = self.credential_file(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(Error::FileRemoval { path, error }),
        }
    }

    /// Names of all credential files in the profiles directory, sorted.
    pub fn list_profiles(&self) -> Result<Vec<ProfileName>, Error> {
        let dir = self.profiles_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(error) => return Err(Error::FileRead { path: dir, error }),
        };
        let mut res = vec![];
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(OsStr::to_str) != Some(CREDENTIAL_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            match stem.parse::<ProfileName>() {
                Ok(name) => res.push(name),
                Err(e) => tracing::warn!("ignoring {path:?}: {e}"),
            }
        }
        res.sort();
        Ok(res)
    }
}

pub fn global_config_path() -> Result<PathBuf, Error> {
    let config_dir = if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from_str(&config_home).map_err(|_| Error::XdgConfigHome(config_home))?
    } else {
        UserDirs::new()
            .ok_or(Error::HomeDirNotFound)?
            .home_dir()
            .join(".config")
    };
    Ok(config_dir.join(CONFIG_DIR_NAME))
}

fn read_optional(path: &Path) -> Result<Option<String>, Error> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(Error::FileRead {
            path: path.to_path_buf(),
            error,
        }),
    }
}

fn create_private_dir(dir: &Path) -> Result<(), Error> {
    let failed = |error: io::Error| Error::DirCreationFailed {
        path: dir.to_path_buf(),
        error,
    };
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(0o700);
        builder.create(dir).map_err(failed)?;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700)).map_err(failed)?;
    }
    #[cfg(not(unix))]
    builder.create(dir).map_err(failed)?;
    Ok(())
}

/// Replace `path` with `contents` through a temporary file in the same
/// directory, so the previous file survives any failure before the rename.
fn write_private(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let failed = |error: io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        error,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(failed)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(failed)?;
    }
    file.write_all(contents).map_err(failed)?;
    file.as_file().sync_all().map_err(failed)?;
    file.persist(path).map_err(|e| failed(e.error))?;
    Ok(())
}
