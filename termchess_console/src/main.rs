#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod network;
mod tui;

use clap::parser::ValueSource;
use clap::{arg, Command};
use termchess::client::GameMode;
use termchess::display::Charset;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("termchess")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Terminal client for networked chess")
        .arg(arg!(<server_address> "Server address, host or host:port"))
        .arg(arg!(<player_name> "Player name"))
        .arg(
            arg!(--create [key] "Create a private room, optionally under a chosen key")
                .conflicts_with_all(["join", "computer"]),
        )
        .arg(arg!(--join <key> "Join a private room by key").conflicts_with("computer"))
        .arg(arg!(--computer "Play against the server-side computer opponent"))
        .arg(arg!(--ascii "Render the board with letters instead of pictograms"))
        .get_matches();

    let mode = if matches.get_flag("computer") {
        GameMode::Computer
    } else if let Some(key) = matches.get_one::<String>("join") {
        GameMode::JoinRoom { key: key.clone() }
    } else if matches.value_source("create") == Some(ValueSource::CommandLine) {
        GameMode::CreateRoom { key: matches.get_one::<String>("create").cloned() }
    } else {
        GameMode::QuickMatch
    };
    let charset = if matches.get_flag("ascii") { Charset::Ascii } else { Charset::Unicode };

    client_main::run(client_main::ClientConfig {
        server_address: matches.get_one::<String>("server_address").unwrap().clone(),
        player_name: matches.get_one::<String>("player_name").unwrap().clone(),
        mode,
        charset,
    })
}
