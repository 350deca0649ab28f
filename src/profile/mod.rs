//! Profile operations.
//!
//! Every operation works on a [`Locator`] and, when it touches the managed
//! credential slot, a [`CredentialStore`]. Steps are ordered so that reads and
//! validation happen first; a failing step leaves the files it has not yet
//! reached untouched.

use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::locator::{self, Locator},
    store::{self, CredentialStore},
};

pub mod metadata;
pub mod name;

pub use metadata::{Metadata, ProfileInfo};
pub use name::ProfileName;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error(transparent)]
    Store(#[from] store::Error),
    #[error("no credentials are set in the credential store; sign in to the application first")]
    NoCredentials,
    #[error("profile already exists: {0}. Use --force to overwrite it")]
    AlreadyExists(ProfileName),
    #[error("profile not found: {0}")]
    NotFound(ProfileName),
}

#[derive(Debug)]
pub struct Added {
    pub path: PathBuf,
    pub replaced: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LoggedOut {
    pub previous: Option<String>,
    pub cleared: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Deleted {
    pub was_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listed {
    pub name: ProfileName,
    pub info: Option<ProfileInfo>,
    pub active: bool,
}

#[derive(Debug)]
pub struct Status {
    pub active: Option<String>,
    pub info: Option<ProfileInfo>,
    /// False when the pointer names a profile without a credential file.
    pub active_has_credentials: bool,
    pub profiles: usize,
    pub root: PathBuf,
}

/// Capture the secret currently in `store` and save it as `name`, which
/// becomes the active profile.
pub fn add(
    locator: &Locator,
    store: &dyn CredentialStore,
    name: &ProfileName,
    description: &str,
    force: bool,
) -> Result<Added, Error> {
    let replaced = locator.has_credential(name);
    if replaced && !force {
        return Err(Error::AlreadyExists(name.clone()));
    }
    let mut metadata = locator.read_metadata()?;
    let secret = store
        .read()?
        .filter(|secret| !secret.is_empty())
        .ok_or(Error::NoCredentials)?;

    let path = locator.write_credential(name, &secret)?;
    metadata.record_add(name, description, Utc::now());
    locator.write_metadata(&metadata)?;
    locator.write_current(Some(name))?;
    tracing::debug!("saved profile {name} to {path:?}");
    Ok(Added { path, replaced })
}

/// Restore the saved secret of `name` into `store` and mark it active.
pub fn login(locator: &Locator, store: &dyn CredentialStore, name: &ProfileName) -> Result<(), Error> {
    if !locator.has_credential(name) {
        return Err(Error::NotFound(name.clone()));
    }
    let mut metadata = locator.read_metadata()?;
    if !metadata.contains(name) {
        tracing::warn!("profile {name} has no metadata entry, recreating it");
    }
    let secret = locator.read_credential(name)?;

    store.write(&secret)?;
    metadata.touch(name, Utc::now());
    locator.write_metadata(&metadata)?;
    locator.write_current(Some(name))?;
    tracing::debug!("restored profile {name} into {}", store.describe());
    Ok(())
}

/// Clear the managed slot in `store` and the active-profile pointer.
pub fn logout(locator: &Locator, store: &dyn CredentialStore) -> Result<LoggedOut, Error> {
    let previous = locator.read_current()?;
    let cleared = store.clear()?;
    if previous.is_some() {
        locator.write_current(None)?;
    }
    Ok(LoggedOut { previous, cleared })
}

/// Remove the credential file and metadata of `name`. Deleting the active
/// profile clears the pointer but leaves the credential store as it is.
pub fn delete(locator: &Locator, name: &ProfileName) -> Result<Deleted, Error> {
    let mut metadata = locator.read_metadata()?;
    let has_metadata = metadata.contains(name);
    if !locator.has_credential(name) && !has_metadata {
        return Err(Error::NotFound(name.clone()));
    }

    locator.remove_credential(name)?;
    if has_metadata {
        metadata.remove(name);
        locator.write_metadata(&metadata)?;
    }
    let was_active = locator.read_current()?.as_deref() == Some(name.as_ref());
    if was_active {
        locator.write_current(None)?;
    }
    tracing::debug!("deleted profile {name}");
    Ok(Deleted { was_active })
}

/// Saved profiles, driven by the credential files present on disk.
pub fn list(locator: &Locator) -> Result<Vec<Listed>, Error> {
    let metadata = locator.read_metadata()?;
    let current = locator.read_current()?;
    Ok(locator
        .list_profiles()?
        .into_iter()
        .map(|name| Listed {
            info: metadata.get(&name).cloned(),
            active: current.as_deref() == Some(name.as_ref()),
            name,
        })
        .collect())
}

pub fn status(locator: &Locator) -> Result<Status, Error> {
    let active = locator.read_current()?;
    let metadata = locator.read_metadata()?;
    let info = active.as_deref().and_then(|name| metadata.get(name)).cloned();
    let active_has_credentials = active
        .as_deref()
        .and_then(|name| name.parse::<ProfileName>().ok())
        .is_some_and(|name| locator.has_credential(&name));
    Ok(Status {
        active,
        info,
        active_has_credentials,
        profiles: locator.list_profiles()?.len(),
        root: locator.root().to_path_buf(),
    })
}
