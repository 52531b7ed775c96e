//! Console client example
//!
//! Prints what the server exposes, then optionally executes one command.
//!
//! Run with:
//!   cargo run --example console -- http://localhost:25566/
//!   cargo run --example console -- http://localhost:25566/ tp x=10 y=64 z=-5

use mcmanager::ManagerClient;
use serde_json::{Map, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .unwrap_or_else(|| "http://localhost:25566/".to_string());
    let client = ManagerClient::connect(&url)?;

    println!("Server at {}", client.endpoint());
    for (key, value) in &client.server_info()? {
        println!("  {:<16} {}", key, value);
    }

    println!("\nMods:");
    for m in client.list_mods()? {
        println!("  {}", m);
    }

    println!("\nMethods: {}", client.list_methods()?.join(", "));

    let commands = client.list_commands()?;
    println!("\nCommands:");
    for command in &commands {
        println!("  {}", command);
    }

    let Some(name) = args.next() else {
        return Ok(());
    };
    let command = commands
        .iter()
        .find(|c| c.name() == name)
        .ok_or_else(|| format!("unknown command '{}'", name))?;

    // key=value pairs; values that parse as JSON keep their type
    let mut arguments = Map::new();
    for pair in args {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        arguments.insert(key.to_string(), value);
    }

    let result = client.execute(command, &arguments)?;
    println!("\n{} ->", command.name());
    for (key, value) in &result {
        println!("  {:<16} {}", key, value);
    }

    Ok(())
}
