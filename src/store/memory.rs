use std::cell::RefCell;

use zeroize::Zeroizing;

use super::{CredentialStore, Error};

/// In-process store for unit tests.
#[derive(Default)]
pub struct MemoryStore {
    secret: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_secret(secret: &str) -> Self {
        MemoryStore {
            secret: RefCell::new(Some(secret.to_string())),
        }
    }

    pub fn secret(&self) -> Option<String> {
        self.secret.borrow().clone()
    }
}

impl CredentialStore for MemoryStore {
    fn read(&self) -> Result<Option<Zeroizing<String>>, Error> {
        Ok(self.secret.borrow().clone().map(Zeroizing::new))
    }

    fn write(&self, secret: &str) -> Result<(), Error> {
        *self.secret.borrow_mut() = Some(secret.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<bool, Error> {
        Ok(self.secret.borrow_mut().take().is_some())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
