use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use url::Url;

use api::{FileSessionStore, HttpGateway};
use services::{
    AdminService, AttemptLoopService, AuthService, CatalogService, Clock, LeaderboardService,
};
use ui::{App, UiApp, build_app_context};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    attempts: Arc<AttemptLoopService>,
    leaderboard: Arc<LeaderboardService>,
    admin: Arc<AdminService>,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    fn attempts(&self) -> Arc<AttemptLoopService> {
        Arc::clone(&self.attempts)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}

struct Args {
    api_url: Url,
    session_file: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--session-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!("  --session-file ./session.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DUO_API_URL, DUO_SESSION_FILE");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url_raw =
            std::env::var("DUO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut session_file = std::env::var("DUO_SESSION_FILE")
            .map_or_else(|_| PathBuf::from("session.json"), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url_raw = value;
                }
                "--session-file" => {
                    session_file = PathBuf::from(require_value(args, "--session-file")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let api_url = Url::parse(&api_url_raw).map_err(|_| ArgsError::InvalidApiUrl {
            raw: api_url_raw.clone(),
        })?;

        Ok(Self {
            api_url,
            session_file,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!("connecting to course service at {}", args.api_url);

    let gateway = Arc::new(HttpGateway::new(args.api_url));
    let sessions = Arc::new(FileSessionStore::new(args.session_file));
    let clock = Clock::default_clock();

    let app = DesktopApp {
        auth: Arc::new(AuthService::new(gateway.clone(), sessions)),
        catalog: Arc::new(CatalogService::new(clock, gateway.clone(), gateway.clone())),
        attempts: Arc::new(AttemptLoopService::new(gateway.clone(), gateway.clone())),
        leaderboard: Arc::new(LeaderboardService::new(gateway.clone())),
        admin: Arc::new(AdminService::new(gateway)),
    };

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Duomonggo")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
