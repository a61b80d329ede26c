use clap::{Arg, ArgAction, Command};
use std::sync::Arc;
use std::time::Duration;
use udsplus_validator::{
    HttpGateway, HttpValidator, ManifestSource, ProfileRegistry, ValidationOrchestrator,
    ValidatorConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("uds-validate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate a UDS+ import manifest and the resource bundles it references")
        .arg(
            Arg::new("manifest")
                .value_name("MANIFEST")
                .help("Manifest URL, inline JSON, or @path to a JSON file")
                .required(true),
        )
        .arg(
            Arg::new("validator-url")
                .long("validator-url")
                .value_name("URL")
                .help("Base URL of the structural validator service")
                .default_value("http://validator_service:4567"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Timeout per outbound request")
                .default_value("30")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("concurrency")
                .long("concurrency")
                .value_name("N")
                .help("Entries validated concurrently (defaults to the CPU count)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty-print the report JSON")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let raw_manifest: &String = matches.get_one("manifest").unwrap();
    let validator_url: &String = matches.get_one("validator-url").unwrap();
    let timeout = Duration::from_secs(*matches.get_one::<u64>("timeout").unwrap());

    let mut config = ValidatorConfig::default()
        .with_validator_base_url(validator_url)
        .with_request_timeout(timeout);
    if let Some(concurrency) = matches.get_one::<usize>("concurrency") {
        config = config.with_max_concurrent_entries(*concurrency);
    }

    let input = match raw_manifest.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => raw_manifest.clone(),
    };
    let source = ManifestSource::detect(&input);

    let gateway = Arc::new(HttpGateway::from_config(&config)?);
    let validator = Arc::new(HttpValidator::from_config(&config)?);
    let orchestrator =
        ValidationOrchestrator::new(ProfileRegistry::uds_plus(), gateway, validator, config);

    let report = orchestrator.run(source).await;

    let rendered = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
