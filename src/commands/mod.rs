use std::str::FromStr;

use clap::{CommandFactory, FromArgMatches, Parser};

pub mod add;
pub mod completion;
pub mod global;
pub mod login;
pub mod logout;
pub mod ls;
pub mod menu;
pub mod prompt;
pub mod rm;
pub mod status;
pub mod version;

pub const HEADING_GLOBAL: &str = "Options (Global)";
pub const HEADING_STORE: &str = "Options (Credential Store)";

const ABOUT: &str = "Keep several accounts of a command line application and switch between them";

const LONG_ABOUT: &str = "

Each profile is a copy of the credential the application keeps in the operating system's \
credential store. `add` captures the credential that is active right now, `login` puts a \
saved one back.

Run without a command to get an interactive menu.

    account-switch add work \"Work account\"
    account-switch login personal
    account-switch list";

#[derive(Parser, Debug)]
#[command(
    name = "account-switch",
    about = ABOUT,
    long_about = ABOUT.to_string() + LONG_ABOUT,
    version = version::SHORT,
    long_version = version::long(),
)]
pub struct Root {
    #[clap(flatten)]
    pub global_args: global::Args,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

impl Root {
    pub fn new() -> Result<Self, clap::Error> {
        let mut matches = Self::command().try_get_matches()?;
        Self::from_arg_matches_mut(&mut matches)
    }

    pub fn from_arg_matches<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_arg_matches_mut(&mut Self::command().try_get_matches_from(itr)?)
    }

    pub fn run(&self) -> Result<(), Error> {
        match &self.cmd {
            Some(Cmd::Add(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::Login(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::Logout(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::List(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::Delete(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::Status(cmd)) => cmd.run(&self.global_args)?,
            Some(Cmd::Completion(cmd)) => cmd.run(),
            Some(Cmd::Version(cmd)) => cmd.run(),
            None => menu::run(&self.global_args)?,
        };
        Ok(())
    }
}

impl FromStr for Root {
    type Err = clap::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_arg_matches(std::iter::once("account-switch").chain(s.split_whitespace()))
    }
}

#[derive(Parser, Debug)]
pub enum Cmd {
    /// Save the credentials currently in the credential store as a profile
    Add(add::Cmd),
    /// Restore a saved profile into the credential store
    Login(login::Cmd),
    /// Clear the credential store and the active profile
    Logout(logout::Cmd),
    /// List saved profiles
    #[command(visible_alias = "ls")]
    List(ls::Cmd),
    /// Delete a saved profile
    #[command(visible_alias = "rm")]
    Delete(rm::Cmd),
    /// Show the active profile
    Status(status::Cmd),
    /// Print shell completion code for the specified shell
    #[command(long_about = completion::LONG_ABOUT)]
    Completion(completion::Cmd),
    /// Print version information
    Version(version::Cmd),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Add(#[from] add::Error),
    #[error(transparent)]
    Login(#[from] login::Error),
    #[error(transparent)]
    Logout(#[from] logout::Error),
    #[error(transparent)]
    Ls(#[from] ls::Error),
    #[error(transparent)]
    Rm(#[from] rm::Error),
    #[error(transparent)]
    Status(#[from] status::Error),
    #[error(transparent)]
    Menu(#[from] menu::Error),
}
