use crate::{commands::global, config::locator, print::Print, profile, store};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error(transparent)]
    Store(#[from] store::Error),
    #[error(transparent)]
    Profile(#[from] profile::Error),
}

#[derive(Debug, clap::Parser, Clone)]
#[group(skip)]
pub struct Cmd;

impl Cmd {
    #[allow(clippy::unused_self)]
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        logout(global_args)
    }
}

pub fn logout(global_args: &global::Args) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    let store = global_args.store.open()?;

    let out = profile::logout(&locator, store.as_ref())?;
    if !out.cleared {
        print.infoln("No credentials were set in the credential store");
    }
    match out.previous {
        Some(name) => print.checkln(format!("Logged out of profile {name}")),
        None => print.checkln("Logged out"),
    }
    Ok(())
}
