use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

use crate::commands::Root;

pub const LONG_ABOUT: &str = "\
Print shell completion code for the specified shell

The script completes subcommands and flags. Profile names are not completed.

    bash:  source <(account-switch completion --shell bash)
    zsh:   account-switch completion --shell zsh > \"${fpath[1]}/_account-switch\"
    fish:  account-switch completion --shell fish > ~/.config/fish/completions/account-switch.fish
";

#[derive(Parser, Debug, Clone)]
#[group(skip)]
pub struct Cmd {
    /// The shell type
    #[arg(long, value_enum)]
    shell: Shell,
}

impl Cmd {
    pub fn run(&self) {
        let cmd = &mut Root::command();
        generate(self.shell, cmd, "account-switch", &mut io::stdout());
    }
}
