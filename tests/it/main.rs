mod cli;
#[cfg(unix)]
mod menu;
#[cfg(unix)]
mod profiles;
