use clap::builder::styling::{AnsiColor, Effects, Styles};

use super::HEADING_GLOBAL;
use crate::{config::locator, store};

const USAGE_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
    .valid(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .invalid(AnsiColor::Yellow.on_default().effects(Effects::BOLD));

#[derive(Debug, clap::Args, Clone, Default)]
#[group(skip)]
#[allow(clippy::struct_excessive_bools)]
#[command(styles = USAGE_STYLES)]
pub struct Args {
    #[clap(flatten)]
    pub locator: locator::Args,

    #[clap(flatten)]
    pub store: store::Args,

    /// Filter logs output. To turn on `account_switch::store=trace` or off `=off`. Can also use env var `RUST_LOG`.
    #[arg(long, short = 'f', global = true, help_heading = HEADING_GLOBAL)]
    pub filter_logs: Vec<String>,

    /// Do not write logs or messages to stderr
    #[arg(long, short = 'q', global = true, help_heading = HEADING_GLOBAL)]
    pub quiet: bool,

    /// Log DEBUG events
    #[arg(long, short = 'v', global = true, help_heading = HEADING_GLOBAL)]
    pub verbose: bool,

    /// Log DEBUG and TRACE events
    #[arg(long, visible_alias = "vv", global = true, help_heading = HEADING_GLOBAL)]
    pub very_verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.quiet {
            None
        } else if self.very_verbose {
            Some(tracing::Level::TRACE)
        } else if self.verbose {
            Some(tracing::Level::DEBUG)
        } else {
            Some(tracing::Level::INFO)
        }
    }
}
