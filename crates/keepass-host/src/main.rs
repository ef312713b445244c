mod config;
mod exit;
mod logging;

use clap::Parser;
use keepass_host_session::{Host, Session, Shutdown};
use keepass_host_store::UnavailableBackend;

use crate::config::HostConfig;
use crate::exit::{CliError, CliResult};

/// Arguments supplied by the browser when it launches the host.
///
/// Chrome passes the caller origin (plus `--parent-window=<id>` on Windows);
/// Firefox passes the host manifest path followed by the extension id.
#[derive(Parser, Debug, Default)]
#[command(name = "keepass-host", version, about = "KeePass native messaging host")]
struct Cli {
    /// Origin of the calling extension, or the host manifest path.
    #[arg(value_name = "ORIGIN")]
    origin: Option<String>,

    /// Remaining launcher arguments.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    launcher_args: Vec<String>,
}

impl Cli {
    /// The calling extension, as best the launcher arguments identify it.
    fn caller(&self) -> Option<&str> {
        let origin = self.origin.as_deref()?;
        if origin.ends_with(".json") {
            return self
                .launcher_args
                .iter()
                .map(String::as_str)
                .find(|arg| !arg.starts_with('-'));
        }
        Some(origin)
    }
}

fn main() {
    let cli = parse_cli();
    let config = HostConfig::from_env();
    if let Some(path) = logging::init_logging(&config) {
        tracing::debug!(path = %path.display(), "diagnostic logging enabled");
    }
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    match run(&cli, &config) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(code = err.code, error = %err, "host failed");
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

/// Parse launcher arguments without ever refusing to start over them.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => Cli::default(),
        },
    }
}

fn run(cli: &Cli, config: &HostConfig) -> CliResult<i32> {
    let mut session = Session::new(UnavailableBackend);
    if let Some(caller) = cli.caller() {
        session = session.with_caller(caller);
    }

    let shutdown = Shutdown::new();
    install_ctrlc_handler(shutdown.clone())?;

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut host =
        Host::with_config(stdin, stdout, session, config.frame.clone()).with_shutdown(shutdown);

    let summary = host
        .run()
        .map_err(|err| exit::host_error("session failed", err))?;
    Ok(exit::stop_code(summary.stop_reason))
}

fn install_ctrlc_handler(shutdown: Shutdown) -> CliResult<()> {
    ctrlc::set_handler(move || {
        shutdown.request();
        if shutdown.is_idle() {
            tracing::info!("interrupted while waiting for input");
            std::process::exit(exit::INTERRUPTED);
        }
    })
    .map_err(|err| CliError::new(exit::INTERNAL, format!("signal handler setup failed: {err}")))
}
