use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;

use clap::{Args, Parser};

use clap_verbosity_flag::{Verbosity, WarnLevel};

use pmbgp::{Credentials, Endpoint, IpLookup, LookingGlass, Password, Query};

use tracing_log::AsTrace;

/// Entry-point function for the `pmbgp` CLI tool.
///
/// Diagnostics are printed to stdout. Help and version requests exit with status 0, every
/// other failure with status 1. Failures to write diagnostics are ignored.
#[must_use]
pub fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            _ = write!(io::stdout().lock(), "{err}");
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match args
        .logging
        .init()
        .and_then(|()| run(args, &mut io::stdout().lock()))
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err);
            _ = writeln!(io::stdout().lock(), "ERROR: {err:#}. Exiting ..");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(args: Cli, out: &mut W) -> anyhow::Result<()> {
    let query = args.query.build()?;
    let endpoint = args.lg.endpoint();
    let mut lg = LookingGlass::connect(&endpoint, args.lg.credentials())
        .with_context(|| format!("failed to connect to looking glass at {endpoint}"))?;
    let response = lg.query(&query).context("looking glass query failed")?;
    writeln!(out, "{}", response.summary())?;
    let known = response.summary().kind().is_some();
    if !known {
        tracing::warn!(
            query_type = response.summary().query_type(),
            "unknown query type in reply, discarding results"
        );
    }
    for record in response {
        let record = record.context("failed to receive query result")?;
        if known {
            out.write_all(record.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    Ok(out.flush()?)
}

/// Query a BGP looking glass.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten, next_help_heading = "Query options")]
    query: QueryOpts,

    #[command(flatten, next_help_heading = "Looking glass options")]
    lg: LookingGlassOpts,

    #[command(flatten, next_help_heading = "Logging options")]
    logging: LoggingOpts,
}

#[derive(Debug, Args)]
struct QueryOpts {
    /// IP address to look up.
    #[arg(short = 'a', long, required_unless_present = "get_peers")]
    address: Option<String>,

    /// Route distinguisher to look up.
    #[arg(short = 'd', long)]
    rd: Option<String>,

    /// BGP peer routing table to look up.
    #[arg(short = 'r', long, required_unless_present = "get_peers")]
    peer: Option<String>,

    /// List the BGP peers known to the looking glass.
    #[arg(short = 'g', long, conflicts_with_all = ["address", "rd", "peer"])]
    get_peers: bool,
}

impl QueryOpts {
    /// Validate the query parameters.
    fn build(self) -> anyhow::Result<Query> {
        if self.get_peers {
            return Ok(Query::GetPeers);
        }
        match (self.peer, self.address) {
            (Some(peer), Some(address)) => {
                Ok(IpLookup::new(&peer, &address, self.rd.as_deref())?.into())
            }
            _ => anyhow::bail!("mandatory options, -a and/or -r, are not specified"),
        }
    }
}

#[derive(Debug, Args)]
struct LookingGlassOpts {
    /// Looking glass hostname or IP address.
    #[arg(short = 'z', long = "lg-host", default_value = Endpoint::DEFAULT_HOST)]
    host: String,

    /// Looking glass port.
    #[arg(
        short = 'Z',
        long = "lg-port",
        default_value_t = Endpoint::DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..),
    )]
    port: u16,

    /// Looking glass username.
    #[arg(short = 'u', long, requires = "password")]
    username: Option<String>,

    /// Looking glass password.
    #[arg(short = 'p', long, requires = "username")]
    password: Option<Password>,
}

impl LookingGlassOpts {
    fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    fn credentials(&self) -> Option<Credentials> {
        self.username
            .clone()
            .zip(self.password.clone())
            .map(|(username, password)| Credentials::new(username, password))
    }
}

#[derive(Debug, Args)]
struct LoggingOpts {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl LoggingOpts {
    fn init(&self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(self.verbosity.log_level_filter().as_trace())
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))
            .context("failed to initialize logger")
    }
}
