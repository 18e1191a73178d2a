#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod config;
mod network;
mod peer_main;
mod tui;

use clap::{Command, arg};
use config::ConsoleConfig;


fn main() -> anyhow::Result<()> {
    // Board rendering owns stdout, so logs go to stderr.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Checkers")
        .version(clap::crate_version!())
        .about("Two-player checkers over a direct peer-to-peer connection")
        .subcommand_required(true)
        .subcommand(
            Command::new("host")
                .about("Wait for the opponent to connect; the host starts every game")
                .arg(
                    arg!(--"port" <port> "Port to listen on")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(arg!(--"config" <config_file> "Path to a yaml-serialized ConsoleConfig")),
        )
        .subcommand(
            Command::new("join")
                .about("Connect to a host")
                .arg(arg!(<address> "Host address, e.g. 192.168.0.7:38617")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("host", sub_matches)) => {
            let mut config = match sub_matches.get_one::<String>("config") {
                Some(path) => ConsoleConfig::read_file(path)?,
                None => ConsoleConfig::default(),
            };
            if let Some(&port) = sub_matches.get_one::<u16>("port") {
                config.port = port;
            }
            peer_main::run_host(config)
        }
        Some(("join", sub_matches)) => {
            let address = sub_matches.get_one::<String>("address").unwrap().clone();
            peer_main::run_guest(&address)
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
