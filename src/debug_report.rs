use passrule::{PolicyReport, SubmitState};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_report(password: &str, report: &PolicyReport, color: bool) {
    let palette = ansi::Palette::new(color);

    // The password itself is never echoed, only its length.
    println!(
        "\n{}",
        palette.bold(palette.paint(
            format!("⚙  Checking policy for a {}-character password", password.chars().count()),
            ansi::CYAN
        ))
    );

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    for outcome in &report.outcomes {
        let mark = if outcome.passed {
            palette.paint("✓", ansi::GREEN)
        } else {
            palette.paint("✗", ansi::YELLOW)
        };
        println!(
            "  {} {}  {}",
            mark,
            palette.paint(format!("{:<11}", outcome.name), ansi::BLUE),
            palette.dim(outcome.message)
        );
    }

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    if report.violations.is_empty() {
        println!("  {}", palette.paint("All rules satisfied", ansi::GREEN));
    } else {
        println!("  Violations: {}", palette.paint(format!("{:?}", report.violations), ansi::YELLOW));
    }
    println!(
        "  Submit: {}",
        match report.submit {
            SubmitState::Enabled => palette.paint("enabled", ansi::GREEN),
            SubmitState::Disabled => palette.dim("disabled"),
        }
    );
    println!();
}
