use std::{env, fmt::Display};

const TERMS: &[&str] = &["Apple_Terminal", "vscode"];

/// Messages for the user on stderr, each prefixed with an icon. Nothing is
/// written when `quiet` is set.
#[derive(Clone)]
pub struct Print {
    pub quiet: bool,
}

impl Print {
    pub fn new(quiet: bool) -> Print {
        Print { quiet }
    }

    // Some terminals like vscode's and macOS' default terminal will not render
    // the subsequent space if the emoji codepoints size is 2; in this case,
    // we need an additional space.
    pub fn compute_emoji<T: Display + Sized>(&self, emoji: T) -> String {
        if let Ok(term_program) = env::var("TERM_PROGRAM") {
            if TERMS.contains(&term_program.as_str()) && emoji.to_string().chars().count() == 2 {
                return format!("{emoji} ");
            }
        }

        emoji.to_string()
    }
}

macro_rules! create_print_functions {
    ($name:ident, $nameln:ident, $icon:expr) => {
        impl Print {
            #[allow(dead_code)]
            pub fn $name<T: Display + Sized>(&self, message: T) {
                if !self.quiet {
                    eprint!("{} {}", self.compute_emoji($icon), message);
                }
            }

            #[allow(dead_code)]
            pub fn $nameln<T: Display + Sized>(&self, message: T) {
                if !self.quiet {
                    eprintln!("{} {}", self.compute_emoji($icon), message);
                }
            }
        }
    };
}

create_print_functions!(check, checkln, "✅");
create_print_functions!(error, errorln, "❌");
create_print_functions!(info, infoln, "ℹ️");
create_print_functions!(key, keyln, "🔑");
create_print_functions!(save, saveln, "💾");
create_print_functions!(warn, warnln, "⚠️");
