use crate::{
    commands::{global, prompt},
    config::locator,
    print::Print,
    profile::{self, ProfileName},
    store,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error(transparent)]
    Store(#[from] store::Error),
    #[error(transparent)]
    Profile(#[from] profile::Error),
    #[error(transparent)]
    Prompt(#[from] prompt::Error),
}

#[derive(Debug, clap::Parser, Clone)]
#[group(skip)]
pub struct Cmd {
    /// Profile to switch to. Chosen from a list when omitted
    pub name: Option<ProfileName>,
}

impl Cmd {
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => prompt::choose_profile(&global_args.locator.locator()?, "log in to")?,
        };
        login(global_args, &name)
    }
}

pub fn login(global_args: &global::Args, name: &ProfileName) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    let store = global_args.store.open()?;

    profile::login(&locator, store.as_ref(), name)?;
    print.keyln(format!("Restored credentials of profile {name}"));
    print.checkln(format!("Profile {name} is now active"));
    Ok(())
}
