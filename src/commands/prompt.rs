use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Confirm, Input};

use crate::{
    config::locator::{self, Locator},
    profile::name::{self, ProfileName},
};

/// Literal a user has to type to confirm a deletion.
pub const CONFIRMATION_TOKEN: &str = "DELETE";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Interactive(#[from] dialoguer::Error),
    #[error(transparent)]
    Name(#[from] name::Error),
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error("no input given")]
    NoInput,
    #[error("no profiles saved yet; use `account-switch add` first")]
    NoProfiles,
    #[error("invalid selection: {0:?}")]
    InvalidSelection(String),
}

// dialoguer needs a terminal on both ends; piped input is read line by line.
fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Ask for one line of text. Returns `None` at end of piped input.
pub fn read_line(prompt: &str) -> Result<Option<String>, Error> {
    if is_interactive() {
        let line = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        return Ok(Some(line));
    }
    eprint!("{prompt}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn profile_name(prompt: &str) -> Result<ProfileName, Error> {
    let line = read_line(prompt)?.ok_or(Error::NoInput)?;
    Ok(line.trim().parse()?)
}

/// Offer the saved profiles as a numbered list and read a choice, either
/// the number or the name.
pub fn choose_profile(locator: &Locator, action: &str) -> Result<ProfileName, Error> {
    let names = locator.list_profiles()?;
    if names.is_empty() {
        return Err(Error::NoProfiles);
    }
    let current = locator.read_current()?;
    eprintln!("Saved profiles:");
    for (i, name) in names.iter().enumerate() {
        let marker = if current.as_deref() == Some(name.as_ref()) {
            " (active)"
        } else {
            ""
        };
        eprintln!("  {}) {name}{marker}", i + 1);
    }
    let line = read_line(&format!("Profile to {action} [1-{}]", names.len()))?
        .ok_or(Error::NoInput)?;
    select(&names, &line)
}

fn select(names: &[ProfileName], input: &str) -> Result<ProfileName, Error> {
    let input = input.trim();
    let selected = match input.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| names.get(i)),
        Err(_) => names.iter().find(|name| name.as_ref() == input),
    };
    selected
        .cloned()
        .ok_or_else(|| Error::InvalidSelection(input.to_string()))
}

/// Ask the user to type [`CONFIRMATION_TOKEN`]. Anything else, including end
/// of input, declines.
pub fn confirm_deletion(prompt: &str) -> Result<bool, Error> {
    Ok(read_line(&format!("{prompt} Type {CONFIRMATION_TOKEN} to confirm"))?
        .is_some_and(|line| is_confirmation(&line)))
}

fn is_confirmation(line: &str) -> bool {
    line.trim() == CONFIRMATION_TOKEN
}

/// Yes/no question defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool, Error> {
    if is_interactive() {
        return Ok(Confirm::new().with_prompt(prompt).default(false).interact()?);
    }
    Ok(read_line(&format!("{prompt} [y/N]"))?.is_some_and(|answer| is_yes(&answer)))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
