use anyhow::Context;
use clap::Parser;
use ticket_filter::utils::error::ErrorCategory;
use ticket_filter::utils::{logger, validation::Validate};
use ticket_filter::{
    CliConfig, CollectionManifest, CollectionReport, ManifestSession, OutputFormat, TicketConfig,
    TicketError, TicketPlugin,
};

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            let exit_code = match e.downcast_ref::<TicketError>() {
                Some(ticket_error) => {
                    tracing::error!("{:#}", e);
                    eprintln!("❌ {}", ticket_error.user_friendly_message());
                    eprintln!("💡 {}", ticket_error.recovery_suggestion());
                    match ticket_error.category() {
                        ErrorCategory::Configuration => 1,
                        ErrorCategory::Input => 2,
                    }
                }
                None => {
                    eprintln!("❌ {:#}", e);
                    2
                }
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<String> {
    cli.validate()?;

    let file_config = TicketConfig::load(cli.config.as_deref())?;
    let tools = cli.resolve_tools(&file_config)?;

    let manifest = CollectionManifest::from_file(&cli.manifest)
        .with_context(|| format!("failed to load manifest {}", cli.manifest.display()))?;
    let items = manifest.collect_items()?;

    let mut session = ManifestSession::new(cli.format == OutputFormat::Json);
    let mut plugin = TicketPlugin::configure(tools, cli.filter_list(), &mut session);
    let report = session.run(&mut plugin, items)?;

    render(&report, cli.format)
}

fn render(report: &CollectionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(report.to_json()?),
        OutputFormat::Text => Ok(report.to_text()),
    }
}
