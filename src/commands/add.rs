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
    /// Name of the profile, e.g. "work". Prompted for when omitted
    pub name: Option<ProfileName>,

    /// Free text shown by `list` and `status`
    pub description: Option<String>,

    /// Overwrite an existing profile with the same name
    #[arg(long)]
    pub force: bool,
}

impl Cmd {
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        let (name, description) = match &self.name {
            Some(name) => (name.clone(), self.description.clone().unwrap_or_default()),
            None => {
                let name = prompt::profile_name("Profile name")?;
                let description = prompt::read_line("Description (optional)")?.unwrap_or_default();
                (name, description)
            }
        };
        add(global_args, &name, description.trim(), self.force)
    }
}

pub fn add(
    global_args: &global::Args,
    name: &ProfileName,
    description: &str,
    force: bool,
) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    let store = global_args.store.open()?;

    let added = profile::add(&locator, store.as_ref(), name, description, force)?;
    if added.replaced {
        print.saveln(format!("Overwrote profile {name} at {}", added.path.display()));
    } else {
        print.saveln(format!("Saved profile {name} to {}", added.path.display()));
    }
    print.checkln(format!("Profile {name} is now active"));
    Ok(())
}
