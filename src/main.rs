use anyhow::{Context, Result};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use steply_login::app::App;
use steply_login::config::{ConfigOverrides, FormConfig, ValidityMode};
use steply_login::runtime::Runtime;
use steply_login::terminal::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(name = "steply-login", about = "Email/password login form for the terminal")]
struct Cli {
    /// YAML file with form settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How form validity follows the fields
    #[arg(long, value_enum)]
    mode: Option<ValidityMode>,

    /// Idle time before form validity is rechecked (debounced mode)
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Pre-fill the email field
    #[arg(long)]
    email: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn form_config(&self) -> Result<FormConfig> {
        let overrides = ConfigOverrides {
            mode: self.mode,
            debounce_ms: self.debounce_ms,
            email: self.email.clone(),
        };
        Ok(FormConfig::resolve(self.config.as_deref(), overrides)?)
    }
}

fn init_logging(path: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let file_name = path
        .file_name()
        .context("log file path has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("steply_login=info".parse()?),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.as_ref())?;
    let config = cli.form_config()?;
    info!(mode = ?config.mode, debounce_ms = config.debounce_ms, "starting login form");

    let logged_in: Rc<RefCell<Option<String>>> = Rc::default();
    let sink = Rc::clone(&logged_in);
    let app = App::new(&config, move |email: &str, _password: &str| {
        *sink.borrow_mut() = Some(email.to_string());
    });

    let terminal = Terminal::new().context("failed to open terminal")?;
    Runtime::new(app, terminal).run()?;

    match logged_in.borrow().as_deref() {
        Some(email) => println!("Logged in as {email}"),
        None => println!("Login cancelled"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use steply_login::config::ValidityMode;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "steply-login",
            "--mode",
            "immediate",
            "--debounce-ms",
            "0",
            "--email",
            "a@b.com",
        ])
        .expect("flags should parse");
        let config = cli.form_config().expect("immediate mode accepts zero debounce");
        assert_eq!(config.mode, ValidityMode::Immediate);
        assert_eq!(config.debounce_ms, 0);
        assert_eq!(config.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn zero_debounce_flag_is_rejected_in_debounced_mode() {
        let cli = Cli::try_parse_from(["steply-login", "--debounce-ms", "0"])
            .expect("flags should parse");
        assert!(cli.form_config().is_err());
    }
}
