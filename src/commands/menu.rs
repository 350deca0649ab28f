//! Interactive menu shown when no subcommand is given.
//!
//! Each choice runs the same code as its subcommand, prompting for whatever
//! the subcommand would take as arguments. A failing choice is reported and
//! the menu is shown again; end of input or `7` leaves it.

use std::str::FromStr;

use crate::{
    commands::{self, add, global, login, logout, ls, prompt, rm, status},
    print::Print,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Prompt(#[from] prompt::Error),
}

const MENU: &str = "\
Account switch
  1) Add the current credentials as a profile
  2) Log in to a profile
  3) Log out
  4) List profiles
  5) Delete a profile
  6) Status
  7) Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Add,
    Login,
    Logout,
    List,
    Delete,
    Status,
    Exit,
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "1" | "add" => Choice::Add,
            "2" | "login" => Choice::Login,
            "3" | "logout" => Choice::Logout,
            "4" | "list" | "ls" => Choice::List,
            "5" | "delete" | "rm" => Choice::Delete,
            "6" | "status" => Choice::Status,
            "7" | "exit" | "quit" | "q" => Choice::Exit,
            other => return Err(format!("invalid option {other:?}, choose 1-7")),
        })
    }
}

impl Choice {
    fn run(self, global_args: &global::Args) -> Result<(), commands::Error> {
        match self {
            Choice::Add => add_interactive(global_args)?,
            Choice::Login => login::Cmd { name: None }.run(global_args)?,
            Choice::Logout => logout::logout(global_args)?,
            Choice::List => ls::list(global_args)?,
            Choice::Delete => rm::Cmd { name: None }.run(global_args)?,
            Choice::Status => status::status(global_args)?,
            Choice::Exit => {}
        }
        Ok(())
    }
}

pub fn run(global_args: &global::Args) -> Result<(), Error> {
    let errors = Print::new(false);
    loop {
        eprintln!("\n{MENU}");
        let Some(line) = prompt::read_line("Choose an option [1-7]")? else {
            eprintln!();
            return Ok(());
        };
        let choice = match line.parse::<Choice>() {
            Ok(Choice::Exit) => return Ok(()),
            Ok(choice) => choice,
            Err(e) => {
                errors.errorln(format!("error: {e}"));
                continue;
            }
        };
        tracing::debug!("menu choice {choice:?}");
        if let Err(e) = choice.run(global_args) {
            errors.errorln(format!("error: {e}"));
        }
    }
}

// Same as `add` without arguments, except that an existing profile is
// overwritten after asking instead of requiring --force.
fn add_interactive(global_args: &global::Args) -> Result<(), add::Error> {
    let name = prompt::profile_name("Profile name")?;
    let mut force = false;
    if global_args.locator.locator()?.has_credential(&name) {
        force = prompt::confirm(&format!("Profile {name} already exists. Overwrite it?"))?;
        if !force {
            Print::new(global_args.quiet).infoln("Kept the existing profile");
            return Ok(());
        }
    }
    let description = prompt::read_line("Description (optional)")?.unwrap_or_default();
    add::add(global_args, &name, description.trim(), force)
}
