use crate::{
    format_duration, ClientConfig, FetchClient, FetchContext, Fields, HttpTransport, Link,
    Transport,
};
use anyhow::Context;
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "metagrab")]
#[command(about = "Fetch a web page and print its title, description and meta tags as JSON")]
#[command(version)]
pub struct Cli {
    #[arg(help = "URL to fetch")]
    pub url: String,

    #[arg(long, default_value = "all", help = "Fields to extract (title,url,meta,description,content or all)")]
    pub fields: Fields,

    #[arg(long, default_value_t = 10, help = "Overall timeout in seconds")]
    pub timeout: u64,

    #[arg(long, help = "Custom User-Agent header")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Process exit status for the command line front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Usage,
    FetchFailed,
    EncodeFailed,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Usage => 1,
            ExitStatus::FetchFailed => 2,
            ExitStatus::EncodeFailed => 3,
        }
    }
}

/// Parse `args`, printing help/version or a usage error as clap would.
///
/// Returns `Err` with the status to exit with when no fetch should happen.
pub fn parse_args<I, A>(args: I) -> Result<Cli, ExitStatus>
where
    I: IntoIterator<Item = A>,
    A: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                    Err(ExitStatus::Success)
                }
                _ => Err(ExitStatus::Usage),
            }
        }
    }
}

pub struct CliRunner<T = HttpTransport> {
    pub client: FetchClient<T>,
}

impl CliRunner<HttpTransport> {
    pub fn new(args: &Cli) -> anyhow::Result<Self> {
        let config = ClientConfig {
            user_agent: args.user_agent.clone(),
            ..Default::default()
        };
        let client = FetchClient::new(config).context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl<T: Transport> CliRunner<T> {
    pub fn with_client(client: FetchClient<T>) -> Self {
        Self { client }
    }

    /// Fetch `args.url`, write the JSON record to `out` and report timing on stderr.
    pub async fn run<W: Write>(&self, args: &Cli, out: &mut W) -> ExitStatus {
        let started = Instant::now();
        let ctx = FetchContext::with_timeout(Duration::from_secs(args.timeout));

        info!("Fetching {} (fields: {})", args.url, args.fields);

        let link = match self.client.fetch_with_status(&ctx, &args.url, args.fields).await {
            Ok((link, status)) => {
                debug!("{} answered with status {}", args.url, status);
                link
            }
            Err(e) => {
                error!("Fetch failed: {}", e);
                eprintln!("Error: {e}");
                return ExitStatus::FetchFailed;
            }
        };

        if let Err(e) = write_link(out, &link) {
            eprintln!("JSON error: {e:#}");
            return ExitStatus::EncodeFailed;
        }

        eprintln!("Took {}", format_duration(started.elapsed()));
        ExitStatus::Success
    }
}

/// Serialize `link` as a single JSON object followed by a newline.
pub fn write_link<W: Write>(out: &mut W, link: &Link) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, link).context("encoding link as JSON")?;
    out.write_all(b"\n").context("writing output")?;
    out.flush().context("flushing output")?;
    Ok(())
}

pub fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout carries the JSON document
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}
