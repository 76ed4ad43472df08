//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use metricboard_domain::filter::SortOrder;

#[derive(Debug, Parser)]
#[command(name = "metricboard", version, about = "Terminal client for the metrics dashboard API")]
pub struct Cli {
    /// Config file (defaults to ./metricboard.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange credentials for a session token and store it.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "METRICBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show the summary cards.
    Summary,
    /// Show one page of the metrics table.
    Metrics(MetricsArgs),
    /// Check that the backend is reachable.
    Status,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Only records for this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
    /// Column to sort by.
    #[arg(long, value_name = "COLUMN")]
    pub sort_by: Option<String>,
    /// Sort direction: asc or desc.
    #[arg(long, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn should_pass_clap_debug_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_login() {
        let cli = Cli::try_parse_from(["metricboard", "login", "-u", "user1", "-p", "pw"]).unwrap();
        match cli.command {
            Command::Login { username, password } => {
                assert_eq!(username, "user1");
                assert_eq!(password, "pw");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn should_parse_metrics_with_defaults() {
        let cli = Cli::try_parse_from(["metricboard", "metrics"]).unwrap();
        let Command::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };
        assert_eq!(args.page, 1);
        assert_eq!(args.order, SortOrder::Asc);
        assert!(args.date.is_none());
        assert!(args.sort_by.is_none());
    }

    #[test]
    fn should_parse_metrics_filters() {
        let cli = Cli::try_parse_from([
            "metricboard",
            "metrics",
            "--date",
            "2024-08-16",
            "--sort-by",
            "impressions",
            "--order",
            "desc",
            "--page",
            "3",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Command::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };
        assert_eq!(args.date.as_deref(), Some("2024-08-16"));
        assert_eq!(args.sort_by.as_deref(), Some("impressions"));
        assert_eq!(args.order, SortOrder::Desc);
        assert_eq!(args.page, 3);
    }

    #[test]
    fn should_reject_page_zero_and_unknown_order() {
        assert!(Cli::try_parse_from(["metricboard", "metrics", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["metricboard", "metrics", "--order", "up"]).is_err());
    }
}
