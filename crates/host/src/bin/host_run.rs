use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use host::{Config, Host, HostConfig};
use state::State;
use types::{Address, CallKind, CallMessage, Revision, TxContext};
use vm::{ExampleVm, Vm};

/// Runs contract code on the example VM through the host bridge
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Contract code as hex (0x prefix optional)
    #[arg(short, long)]
    code: String,

    /// Call input as hex; ignored with --create
    #[arg(short, long, default_value = "")]
    input: String,

    /// Gas given to the top-level call
    #[arg(short, long, default_value_t = 1_000_000)]
    gas: i64,

    /// Revision name or number, overrides the config file
    #[arg(short, long)]
    rev: Option<Revision>,

    /// Run the code as init code of a CREATE instead of calling it
    #[arg(long)]
    create: bool,

    /// Host config as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block number reported to the contract
    #[arg(long, default_value_t = 0)]
    block_number: i64,
}

const SENDER: Address = Address([0xaa; 20]);
const CONTRACT: Address = Address([0xcc; 20]);

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn decode_hex(flag: &str, value: &str) -> Result<Vec<u8>> {
    let value = value.trim();
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).with_context(|| format!("{} is not valid hex", flag))
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HostConfig::load(path).context("failed to load host config")?,
        None => HostConfig::default(),
    };
    if let Some(rev) = args.rev {
        config.revision = rev;
    }

    let code = decode_hex("--code", &args.code)?;
    if code.len() > Config::CODE_SIZE_LIMIT {
        anyhow::bail!(
            "code is {} bytes, limit is {}",
            code.len(),
            Config::CODE_SIZE_LIMIT
        );
    }
    let input = decode_hex("--input", &args.input)?;

    let mut state = State::new();
    state.set_balance(SENDER, 1_000_000);
    let (message, call_input) = if args.create {
        let message = CallMessage {
            kind: CallKind::Create,
            ..CallMessage::call(SENDER, CONTRACT, args.gas)
        };
        (message, code)
    } else {
        state.deploy_contract(CONTRACT, code);
        (CallMessage::call(SENDER, CONTRACT, args.gas), input)
    };

    let tx_context = TxContext {
        origin: SENDER,
        block_number: args.block_number,
        gas_limit: args.gas,
        ..TxContext::default()
    };

    let vm = ExampleVm::new();
    println!(
        "{}",
        format!("{} {} ({:?})", vm.name(), vm.version(), config.revision)
            .bold()
            .blue()
    );

    let mut host = Host::new(state, &vm, tx_context).with_config(config);
    let execution = host
        .execute(&message, &call_input)
        .context("execution faulted")?;

    let status = format!("{}", execution.result.status_code);
    if execution.result.is_success() {
        println!("{} {}", "✔".green(), status.green());
    } else {
        println!("{} {}", "✘".red(), status.red());
    }
    println!("{}", execution);
    Ok(())
}
