use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use dd2hcl::{Config, Exporter, ResourceId, ResourceKind};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Export Datadog dashboards and monitors as Terraform HCL
#[derive(Parser, Debug)]
#[command(name = "dd2hcl", version, about, long_about = None)]
struct Cli {
    /// Resource type: dashboard or monitor
    resource_type: ResourceKind,

    /// Resource id, or `query` to export every monitor matching --query
    resource_id: ResourceId,

    /// Datadog site, e.g. datadoghq.eu
    #[arg(long, env = "DD_SITE")]
    site: Option<String>,

    /// Monitor search filter used with `query`
    #[arg(long, env = "DD_MONITOR_QUERY")]
    query: Option<String>,

    /// Directory the per-monitor files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // RUST_LOG wins, then LOG_LEVEL, then "warn"
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(site) = cli.site {
        config.site = site;
    }
    if let Some(query) = cli.query {
        config.monitor_query = query;
    }
    config.output_dir = cli.output_dir;

    let exporter = Exporter::new(config)?;
    let mut stdout = std::io::stdout().lock();

    exporter
        .run(cli.resource_type, &cli.resource_id, &mut stdout)
        .await
        .with_context(|| format!("{} {}", cli.resource_type, cli.resource_id))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_single() {
        let cli = Cli::try_parse_from(["dd2hcl", "monitor", "12345"]).unwrap();
        assert_eq!(cli.resource_type, ResourceKind::Monitor);
        assert_eq!(cli.resource_id, ResourceId::Id("12345".to_string()));
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_parse_query_mode() {
        let cli =
            Cli::try_parse_from(["dd2hcl", "monitor", "query", "--output-dir", "out"]).unwrap();
        assert_eq!(cli.resource_id, ResourceId::Query);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_rejects_unknown_resource_type() {
        let result = Cli::try_parse_from(["dd2hcl", "synthetics", "1"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_requires_both_arguments() {
        let result = Cli::try_parse_from(["dd2hcl", "dashboard"]);
        assert_eq!(
            result.unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
    }
}
