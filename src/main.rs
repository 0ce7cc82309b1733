mod cli;
mod runner;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "docforge=debug,df_core=debug,df_host=debug,df_pipeline=debug".to_string()
        } else {
            "docforge=info,df_core=info,df_host=info,df_pipeline=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Run {
            inputs,
            scenario,
            actions,
            output,
            keep_staging,
            dry_run,
        } => runner::run(runner::RunArgs {
            config: cli.config,
            inputs,
            scenario,
            actions,
            output,
            keep_staging,
            dry_run,
        }),
        Commands::Actions { json } => runner::list_actions(json),
        Commands::Validate => runner::validate(cli.config),
        Commands::Version => {
            println!("docforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
