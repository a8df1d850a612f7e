use domain_name_resolver::{Limits, Resolver, UdpTransport};
use std::error::Error;
use tracing_subscriber::EnvFilter;

mod cli_args;

use cli_args::{CliArgs, USAGE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // stdout is reserved for the trace dump and the result line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().collect();
    let command = raw_args.first().map(String::as_str).unwrap_or("lookup");
    let rest: Vec<&str> = raw_args.iter().skip(1).map(String::as_str).collect();

    let args = match CliArgs::parse(command, &rest) {
        Some(args) => args,
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };
    let root = match args.root_address() {
        Some(root) => root,
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = configuration::get_config(&args.config).unwrap_or_else(|e| {
        tracing::warn!("ignoring configuration: {}", e);
        configuration::LookupConfiguration::default()
    });
    tracing::debug!("configuration: {:?}", config);

    let limits = Limits {
        server_port: config.server_port,
        max_queries: config.max_queries,
        max_consecutive_timeouts: config.max_consecutive_timeouts,
    };
    let transport = UdpTransport::new(config.receive_timeout(), config.max_response_size);

    let mut resolver = Resolver::new(transport, fastrand::Rng::new()).with_limits(limits);
    if args.trace {
        resolver = resolver.with_trace(std::io::stdout());
    }

    let report = resolver.report(root, &args.fqdn).await;
    println!("{}", report);

    Ok(())
}
