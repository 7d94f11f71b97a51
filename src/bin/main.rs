//! walletkit CLI - inspect the wallet catalog, networks and stored preference
//!
//!   walletkit wallets [--sep43]     → built-in wallet catalog
//!   walletkit network [name]        → passphrase + Horizon URL (all networks if no name)
//!   walletkit prefs                 → last selected wallet id
//!   walletkit prefs forget          → clear the stored wallet id
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use stellar_wallets_kit::core::catalog;
use stellar_wallets_kit::logging::init_logging;
use stellar_wallets_kit::{FilePreferences, Network, Preferences};
use std::env;
use std::io::IsTerminal;
use std::rc::Rc;
use tracing::debug;

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);
    init_logging(opts.verbose);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("walletkit {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("wallets") | Some("ls") => cmd_wallets(&opts),
        Some("network") | Some("networks") => cmd_network(&opts),
        Some("prefs") => cmd_prefs(&opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": e.to_string()}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    args: Vec<String>,
    home: Option<String>,
    sep43: bool,
    json: bool,
    pretty: bool,
    verbose: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--verbose" | "-v" => opts.verbose = true,
                "--sep43" => opts.sep43 = true,
                "--home" => {
                    if i + 1 < args.len() {
                        opts.home = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        opts.args = positional;
        opts
    }
}

fn cmd_wallets(opts: &ParsedArgs) -> Result<Value> {
    let entries: Vec<_> = catalog::catalog()
        .into_iter()
        .filter(|e| !opts.sep43 || e.sep43)
        .collect();
    debug!(count = entries.len(), sep43 = opts.sep43, "listing catalog");
    Ok(json!({ "wallets": entries, "count": entries.len() }))
}

fn network_json(network: Network) -> Value {
    json!({
        "network": network.as_str(),
        "networkPassphrase": network.passphrase(),
        "horizonUrl": network.horizon_url(),
    })
}

fn cmd_network(opts: &ParsedArgs) -> Result<Value> {
    match opts.args.first() {
        Some(name) => {
            let network = Network::from_str(name).ok_or_else(|| anyhow!("Unknown network: {}", name))?;
            Ok(network_json(network))
        }
        None => Ok(Value::Array(Network::ALL.into_iter().map(network_json).collect())),
    }
}

fn cmd_prefs(opts: &ParsedArgs) -> Result<Value> {
    let store = match &opts.home {
        Some(home) => FilePreferences::new(std::path::Path::new(home).join("preferences.json")),
        None => FilePreferences::open_default()?,
    };
    let path = store.path().display().to_string();
    let prefs = Preferences::new(Rc::new(store));

    match opts.args.first().map(String::as_str) {
        None | Some("get") => Ok(json!({ "selectedWalletId": prefs.last_wallet_id()?, "path": path })),
        Some("forget") => {
            prefs.forget_wallet()?;
            Ok(json!({ "selectedWalletId": Value::Null, "path": path }))
        }
        Some(other) => Err(anyhow!("Unknown prefs action: {}", other)),
    }
}

fn print_usage() {
    println!(
        r#"walletkit - Stellar Wallets Kit utilities

USAGE:
    walletkit <command> [args] [options]

COMMANDS:
    wallets                 List the built-in wallet catalog
    network [name]          Show passphrase and Horizon URL (public|testnet|futurenet|sandbox|standalone)
    prefs [get|forget]      Show or clear the last selected wallet id

OPTIONS:
    --sep43                 Only SEP-43 wallets (wallets)
    --home <dir>            Preference directory (env: WALLETKIT_HOME)
    --json                  Raw JSON output
    --pretty                Pretty-print JSON
    --verbose, -v           Debug logging for the kit
    --version, -V           Print version

ENVIRONMENT:
    WALLETKIT_HOME          Preference directory
    WALLETKIT_LOG_FORMAT    pretty|compact|json log lines on stderr
    RUST_LOG                Log filter (overrides --verbose)
"#
    );
}
