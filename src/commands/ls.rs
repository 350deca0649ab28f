use std::io::{self, IsTerminal, Write};

use chrono::Local;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{commands::global, config::locator, print::Print, profile};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Locator(#[from] locator::Error),
    #[error(transparent)]
    Profile(#[from] profile::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, clap::Parser, Clone)]
#[group(skip)]
pub struct Cmd;

impl Cmd {
    #[allow(clippy::unused_self)]
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        list(global_args)
    }
}

pub fn list(global_args: &global::Args) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    let profiles = profile::list(&locator)?;
    if profiles.is_empty() {
        print.infoln("No profiles saved. Use `account-switch add <name>` to save one");
        return Ok(());
    }

    let width = profiles.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let mut stdout = StandardStream::stdout(color_choice());
    for listed in profiles {
        let marker = if listed.active { '*' } else { ' ' };
        if listed.active {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        }
        write!(&mut stdout, "{marker} {:<width$}", listed.name.as_ref())?;
        stdout.reset()?;
        match listed.info {
            Some(info) => {
                if !info.description.is_empty() {
                    write!(&mut stdout, "  {}", info.description)?;
                }
                stdout.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(
                    &mut stdout,
                    "  (last used {})",
                    info.last_used.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                )?;
                stdout.reset()?;
            }
            None => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                write!(&mut stdout, "  (no metadata)")?;
                stdout.reset()?;
            }
        }
        writeln!(&mut stdout)?;
    }
    Ok(())
}

pub(crate) fn color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
