use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use command_client::{ClientConfig, DEFAULT_BUFFER_SIZE, DEFAULT_ORIGIN, DEFAULT_URL, Reply};
use commands::Command;
use tracing::{Level, debug, info, warn};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] command_client::ClientError),
    #[error(transparent)]
    Codec(#[from] commands::CodecError),
    #[error("failed to write reply: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "challenge-probe",
    about = "Send one command to a challenge server and print the reply"
)]
struct Cli {
    /// Websocket endpoint of the challenge server
    #[arg(long, env = "PROBE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Origin header presented during the handshake; empty sends none
    #[arg(long, env = "PROBE_ORIGIN", default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Bytes of the reply to keep
    #[arg(
        long,
        env = "PROBE_BUFFER_SIZE",
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = parse_buffer_size
    )]
    buffer_size: usize,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<ProbeCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum ProbeCommand {
    /// Ask for the challenge currently being mined (default)
    Challenge,
    /// Submit a nonce for the current challenge
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct SubmitArgs {
    #[arg(long)]
    wallet_id: String,

    #[arg(long)]
    nonce: u64,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.url.clone(),
            origin: self.origin.clone(),
            buffer_size: self.buffer_size,
        }
    }

    fn to_command(&self) -> Command {
        match &self.command {
            None | Some(ProbeCommand::Challenge) => Command::get_current_challenge(),
            Some(ProbeCommand::Submit(args)) => Command::submission(&args.wallet_id, args.nonce),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli, &mut io::stdout()).await
}

/// One exchange for `cli`, writing the `Received: ...` line to `out`.
async fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = cli.client_config();
    let command = cli.to_command();
    let payload = commands::encode_command(&command)?;
    debug!(url = %config.url, command = command.name(), "sending command");

    let reply = command_client::exchange(&config, &payload).await?;
    writeln!(out, "{}", render_reply(&reply))?;
    report(&reply);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn render_reply(reply: &Reply) -> String {
    format!("Received: {}.", reply.text())
}

fn report(reply: &Reply) {
    if reply.is_truncated() {
        warn!(
            captured = reply.len(),
            message_len = reply.message_len(),
            "reply truncated to receive buffer"
        );
    }

    match commands::parse_challenge(reply.as_bytes()) {
        Ok(Some(challenge)) => info!(
            name = %challenge.challenge_name,
            hash_prefix = %challenge.hash_prefix,
            nb_elements = ?challenge.nb_elements(),
            "current challenge"
        ),
        Ok(None) => {}
        Err(error) => debug!(%error, "reply is not a challenge message"),
    }
}

fn parse_buffer_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("buffer size must be greater than zero".to_owned()),
        Ok(size) => Ok(size),
        Err(error) => Err(error.to_string()),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
