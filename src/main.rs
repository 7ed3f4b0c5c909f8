use clap::Parser;
use spotprice::cli::{render_for_terminal, Cli};
use spotprice::config::{init_config, Config};
use spotprice::exit_codes::{codes, exit_with_code};
use spotprice::logging::init_logging;
use spotprice::{Ec2SourceProvider, PriceService};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(output) = &cli.init_config {
        return init_config(output);
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit_with_code(&e);
        }
    };

    // Flag (or LOG_LEVEL via clap) beats the config file
    let level = cli.loglevel.or(config.logging.level).unwrap_or_default();
    init_logging(level, config.logging.json);

    if let Some(region) = &cli.region {
        config.aws.region = Some(region.clone());
    }
    if let Some(secs) = cli.timeout {
        config.fetch.deadline_secs = Some(secs);
    }

    let params = cli.request_parameters(level);
    debug!("{:?}", params);

    let provider = Ec2SourceProvider::from_config(&config).await;
    let service = PriceService::new(provider).with_deadline(config.deadline());

    match render_for_terminal(service.quote(&params).await, cli.response_shape()) {
        Ok(output) => {
            println!("{}", output.stdout);
            if output.exit_code != codes::SUCCESS {
                std::process::exit(output.exit_code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit_with_code(&e);
        }
    }
}
