use crate::{
    commands::{global, prompt},
    config::locator,
    print::Print,
    profile::{self, ProfileName},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error(transparent)]
    Profile(#[from] profile::Error),
    #[error(transparent)]
    Prompt(#[from] prompt::Error),
}

#[derive(Debug, clap::Parser, Clone)]
#[group(skip)]
pub struct Cmd {
    /// Profile to delete. Chosen from a list when omitted
    pub name: Option<ProfileName>,
}

impl Cmd {
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => prompt::choose_profile(&global_args.locator.locator()?, "delete")?,
        };
        delete(global_args, &name)
    }
}

/// Delete `name` after the user typed the confirmation token. The credential
/// store is left as it is, even for the active profile.
pub fn delete(global_args: &global::Args, name: &ProfileName) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    if !locator.has_credential(name) && !locator.read_metadata()?.contains(name) {
        return Err(profile::Error::NotFound(name.clone()).into());
    }

    print.warnln(format!("Profile {name} and its saved credentials will be deleted."));
    let confirmed = prompt::confirm_deletion("This cannot be undone.")?;
    if !confirmed {
        print.infoln("Deletion cancelled");
        return Ok(());
    }

    let deleted = profile::delete(&locator, name)?;
    print.checkln(format!("Deleted profile {name}"));
    if deleted.was_active {
        print.infoln("It was the active profile; no profile is active now");
    }
    Ok(())
}
