use clap::Parser;
use storefront_dev::{cli::Cli, handle_command};
use storefront_project::ProjectError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(report) = handle_command(cli.command, cli.config.as_deref()).await {
        // User aborts print as a single line.
        if let Some(abort) = report
            .downcast_ref::<ProjectError>()
            .filter(|e| e.is_user_abort())
        {
            eprintln!("{}", abort);
            std::process::exit(1);
        }
        return Err(report);
    }

    Ok(())
}
