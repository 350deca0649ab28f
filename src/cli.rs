use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

use crate::{print::Print, Root};

pub fn main() {
    let root = Root::new().unwrap_or_else(|e| e.exit());

    if let Some(level) = root.global_args.log_level() {
        let mut e_filter = EnvFilter::from_default_env();
        for directive in std::iter::once(format!("account_switch={level}"))
            .chain(root.global_args.filter_logs.iter().cloned())
        {
            match directive.parse::<Directive>() {
                Ok(directive) => e_filter = e_filter.add_directive(directive),
                Err(e) => {
                    eprintln!("{e}: {directive}");
                    std::process::exit(1);
                }
            }
        }

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(e_filter)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set the global tracing subscriber: {e}");
        }
    }

    if let Err(e) = root.run() {
        // Errors are shown even with --quiet.
        Print::new(false).errorln(format!("error: {e}"));
        std::process::exit(1);
    }
}
