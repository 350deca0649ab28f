use clap::Parser;
use std::fmt::Debug;

pub const SHORT: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_REVISION"), ")");

#[derive(Parser, Debug, Clone)]
#[group(skip)]
pub struct Cmd;

impl Cmd {
    #[allow(clippy::unused_self)]
    pub fn run(&self) {
        println!("account-switch {}", long());
    }
}

pub fn long() -> String {
    let backends = if cfg!(feature = "additional-libs") {
        "security, keyring"
    } else {
        "security"
    };
    [SHORT.to_string(), format!("credential stores: {backends}")].join("\n")
}
