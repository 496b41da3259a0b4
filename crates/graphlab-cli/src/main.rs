use anyhow::Result;
use clap::Parser;
use graphlab_cli::cli::Cli;
use graphlab_cli::commands;
use graphlab_cli::config::Config;
use graphlab_cli::output::OutputContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = Config::load(cli.config.as_deref())?;
    let output = OutputContext {
        json: cli.json || config.output.json,
    };

    let rendered = commands::run(&cli.command, &config, output)?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "graphlab={level},graphlab_core={level},graphlab_cli={level}"
        ))
    });

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
