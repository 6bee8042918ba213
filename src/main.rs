mod debug_report;

use passrule::evaluate;
use std::io::{self, IsTerminal, Read};

fn main() {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let report = evaluate(&config.password, &config.confirm);
    debug_report::print_report(&config.password, &report, config.color);
    std::process::exit(if report.satisfied() { 0 } else { 1 });
}

fn init_tracing() {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).init();
}

struct CliConfig {
    password: String,
    confirm: String,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut password: Option<String> = None;
    let mut confirm: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("passrule {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--confirm" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --confirm expects a value".to_string())?;
                confirm = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if password.is_some() {
                    return Err("error: password provided multiple times".to_string());
                }
                password = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    if password.is_some() {
                        return Err("error: password provided multiple times".to_string());
                    }
                    password = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--confirm=") => {
                confirm = Some(arg.trim_start_matches("--confirm=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                if password.is_some() {
                    return Err("error: password provided multiple times".to_string());
                }
                password = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if password.is_some() {
                    return Err("error: password provided multiple times".to_string());
                }
                password = Some(rest);
                break;
            }
        }
    }

    let password = match password {
        Some(value) => value,
        None => read_stdin_input(&mut confirm)?,
    };

    if password.is_empty() {
        return Err(format!("error: no password provided\n\n{}", help_text()));
    }

    Ok(CliConfig { password, confirm: confirm.unwrap_or_default(), color })
}

/// Read the password from stdin: the first line is the password, an
/// optional second line is the confirmation (unless --confirm was given).
fn read_stdin_input(confirm: &mut Option<String>) -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;

    let mut lines = buffer.lines();
    let password = lines.next().unwrap_or_default().to_string();
    if confirm.is_none() {
        if let Some(second) = lines.next() {
            *confirm = Some(second.to_string());
        }
    }
    Ok(password)
}

fn help_text() -> String {
    format!(
        "passrule {version}

Password-policy diagnostic CLI.

Usage:
  passrule [OPTIONS] [--] <password...>
  passrule [OPTIONS] --input <password>

Options:
  -i, --input <password>     Password to check. If omitted, reads remaining args
                             or stdin when no args are provided (first line is
                             the password, an optional second line the
                             confirmation).
  -c, --confirm <text>       Confirmation value checked against the password.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Policy satisfied.
  1  One or more rules violated.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
