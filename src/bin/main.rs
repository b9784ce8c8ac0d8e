#[derive(clap::Parser)]
#[command(version, about)]
struct Cli {
    /// Read configuration from file
    #[arg(
        short = 'c',
        long,
        value_name = "CONFIG FILE",
        default_value = "eipnotify.toml"
    )]
    config_file: std::path::PathBuf,

    #[command(subcommand)]
    command: CliCommands,
}

#[derive(clap::Subcommand)]
enum CliCommands {
    /// Query the aggregator and print the report without publishing
    Preview {},
    /// Query the aggregator and publish the report to the SNS topic
    Publish {},
}

/// main() for generic environment
#[tokio::main]
async fn main() {
    use clap::Parser;
    use eip_notify::*;

    let cli = Cli::parse();

    match cli.command {
        CliCommands::Preview {} => {
            let config = Config::from_file(&cli.config_file).unwrap();
            let description = render_report(&config).await.unwrap();
            println!("{}", description);
        }
        CliCommands::Publish {} => {
            let config = Config::from_file(&cli.config_file).unwrap();
            publish_report(&config).await.unwrap();
        }
    }
}
