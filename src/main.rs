use std::io::Read;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trade_route_compare::util::version::{long_version, APP_NAME};
use trade_route_compare::{Config, RouteComparisonService, RouteRequest};

const USAGE: &str = "usage: trade-routes <command>

commands:
  compare <request.json|->   compare routes for a JSON request (- reads stdin)
  ports                      list congestion for every known port
  port <CODE>                congestion for one port (default reading if unknown)
  --version                  print the version";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);
    if matches!(command, Some("--version") | Some("-V")) {
        println!("{APP_NAME} {}", long_version());
        return Ok(());
    }
    if matches!(command, None | Some("--help") | Some("-h")) {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::from_env()?;
    let service = RouteComparisonService::from_config(&config).context("failed to build providers")?;

    match (command, args.get(1)) {
        (Some("compare"), Some(source)) => {
            let raw = read_source(source)?;
            let request: RouteRequest = serde_json::from_str(&raw).context("request is not valid JSON")?;
            let response = service.compare(&request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        (Some("ports"), None) => {
            let ports = service.all_port_congestion().await?;
            println!("{}", serde_json::to_string_pretty(&ports)?);
        }
        (Some("port"), Some(code)) => {
            let reading = service.port_congestion_or_default(code).await?;
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        _ => bail!("unrecognised arguments\n\n{USAGE}"),
    }
    Ok(())
}

fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).context("failed to read stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
    }
}
