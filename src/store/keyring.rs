use keyring::Entry;
use zeroize::Zeroizing;

use super::{CredentialStore, Error};

pub struct KeyringStore {
    service: String,
    account: String,
    keyring: Entry,
}

impl KeyringStore {
    pub fn new(service: &str, account: &str) -> Result<Self, Error> {
        Ok(KeyringStore {
            service: service.to_string(),
            account: account.to_string(),
            keyring: Entry::new(service, account)?,
        })
    }
}

impl CredentialStore for KeyringStore {
    fn read(&self) -> Result<Option<Zeroizing<String>>, Error> {
        match self.keyring.get_password() {
            Ok(secret) => Ok(Some(Zeroizing::new(secret))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, secret: &str) -> Result<(), Error> {
        self.keyring.set_password(secret)?;
        Ok(())
    }

    fn clear(&self) -> Result<bool, Error> {
        match self.keyring.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!(
            "keyring (service {:?}, account {:?})",
            self.service, self.account
        )
    }
}
