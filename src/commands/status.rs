use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::{
    commands::{global, ls::color_choice},
    config::locator,
    print::Print,
    profile,
};

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
        status(global_args)
    }
}

pub fn status(global_args: &global::Args) -> Result<(), Error> {
    let print = Print::new(global_args.quiet);
    let locator = global_args.locator.locator()?;
    let status = profile::status(&locator)?;
    let mut out = StandardStream::stdout(color_choice());

    match &status.active {
        Some(name) => field(&mut out, "Active profile", name)?,
        None => field(&mut out, "Active profile", "none")?,
    }
    if let Some(info) = &status.info {
        if !info.description.is_empty() {
            field(&mut out, "Description", &info.description)?;
        }
        field(&mut out, "Created", &local(info.created))?;
        field(&mut out, "Last used", &local(info.last_used))?;
    }
    field(&mut out, "Saved profiles", &status.profiles.to_string())?;
    field(&mut out, "Data directory", &status.root.display().to_string())?;
    field(&mut out, "Credential store", &describe_store(global_args))?;

    if let Some(name) = &status.active {
        if !status.active_has_credentials {
            print.warnln(format!(
                "Active profile {name} has no saved credentials; run `account-switch add {name}` or log in to another profile"
            ));
        }
    }
    Ok(())
}

fn field(out: &mut StandardStream, label: &str, value: &str) -> Result<(), io::Error> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(out, "{:<18}", format!("{label}:"))?;
    out.reset()?;
    writeln!(out, "{value}")
}

fn local(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

// A store that cannot be reached is reported, not treated as a failure.
fn describe_store(global_args: &global::Args) -> String {
    let store = match global_args.store.open() {
        Ok(store) => store,
        Err(e) => return format!("{} (unavailable: {e})", global_args.store.backend),
    };
    let state = match store.read() {
        Ok(Some(secret)) if !secret.is_empty() => "credentials set".to_string(),
        Ok(_) => "no credentials set".to_string(),
        Err(e) => {
            tracing::debug!("reading the credential store failed: {e}");
            format!("unreadable: {e}")
        }
    };
    format!("{} [{state}]", store.describe())
}
