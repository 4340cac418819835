use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use zettelwirtschaft::net::api::ApiError;
use zettelwirtschaft::net::reqwest_transport::ReqwestTransport;
use zettelwirtschaft::net::transport::TransportError;
use zettelwirtschaft::router::navigator::MemoryNavigator;
use zettelwirtschaft::router::route::RouteTable;
use zettelwirtschaft::{GateConfig, GateDecision, LoginResult, ProbeFailurePolicy, SessionContext};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("api request failed: {}", .0.user_message())]
    Api(#[from] ApiError),
    #[error("login rejected: {0}")]
    LoginRejected(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "zw", about = "Zettelwirtschaft session gate CLI")]
struct Cli {
    #[arg(long, env = "ZW_ORIGIN", default_value = "http://127.0.0.1:8000")]
    origin: String,

    /// Value of the `zw_session` cookie from an earlier `login`.
    #[arg(long, env = "ZW_SESSION_TOKEN")]
    session_token: Option<String>,

    #[arg(long, env = "ZW_PROBE_FAILURE", default_value = "open")]
    probe_failure: ProbeFailurePolicy,

    #[arg(long, env = "ZW_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe `/api/auth/status` and print the session picture.
    Status,
    /// Submit a PIN; prints the session token on success.
    Login {
        #[arg(long)]
        pin: String,
    },
    /// End the session on the server.
    Logout,
    /// Ask the navigation gate whether a route may be opened.
    Check { path: String },
    /// GET an API path through the request pipeline.
    Get {
        path: String,
        /// Route the request is issued from; used as the redirect target on 401.
        #[arg(long, default_value = "/")]
        from: String,
    },
}

struct Runtime {
    ctx: SessionContext,
    transport: Rc<ReqwestTransport>,
    navigator: Rc<MemoryNavigator>,
}

impl Runtime {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let config = GateConfig {
            request_timeout: Duration::from_secs(cli.timeout_secs),
            probe_failure: cli.probe_failure,
            ..GateConfig::default()
        };
        let transport = Rc::new(ReqwestTransport::new(&cli.origin, config.request_timeout)?);
        if let Some(token) = cli.session_token.as_deref() {
            transport.seed_session_cookie(token);
        }
        tracing::debug!(origin = %cli.origin, policy = ?config.probe_failure, "session gate configured");
        let navigator = Rc::new(MemoryNavigator::new("/"));
        let ctx = SessionContext::new(&config, RouteTable::standard(), transport.clone(), navigator.clone());
        Ok(Self { ctx, transport, navigator })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rt = Runtime::new(&cli)?;

    match cli.command {
        Command::Status => run_status(&rt).await,
        Command::Login { pin } => run_login(&rt, &pin).await,
        Command::Logout => {
            rt.ctx.session.logout().await;
            println!("logged out");
            Ok(())
        }
        Command::Check { path } => run_check(&rt, &path).await,
        Command::Get { path, from } => run_get(&rt, &path, &from).await,
    }
}

async fn run_status(rt: &Runtime) -> Result<(), CliError> {
    rt.ctx.session.ensure_probed().await;
    let s = rt.ctx.session.snapshot();
    print_json(&serde_json::json!({
        "pin_enabled": s.pin_enabled,
        "authenticated": s.is_authenticated,
    }))
}

async fn run_login(rt: &Runtime, pin: &str) -> Result<(), CliError> {
    match rt.ctx.session.login(pin).await {
        LoginResult::Accepted => {
            match rt.transport.session_cookie() {
                Some(token) => println!("session: {token}"),
                None => println!("accepted (PIN auth disabled; no session cookie)"),
            }
            Ok(())
        }
        LoginResult::Rejected { detail } => Err(CliError::LoginRejected(detail)),
    }
}

async fn run_check(rt: &Runtime, path: &str) -> Result<(), CliError> {
    match rt.ctx.gate.decide(path).await {
        GateDecision::Allow => println!("allow"),
        GateDecision::Redirect(intent) => println!("redirect {}", intent.href()),
    }
    Ok(())
}

async fn run_get(rt: &Runtime, path: &str, from: &str) -> Result<(), CliError> {
    rt.navigator.visit(from);
    match rt.ctx.api.get_json::<Value>(path).await {
        Ok(json) => print_json(&json),
        Err(e) => {
            for intent in rt.navigator.replacements() {
                eprintln!("navigated to {}", intent.href());
            }
            Err(e.into())
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
