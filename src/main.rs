use clap::Parser;
use site_header::core::{ConfigProvider, TemplateStore, TokenParser};
use site_header::utils::{logger, validation::Validate};
use site_header::{
    CliConfig, Command, CreationInformation, LocalTemplateStore, ProvisioningEngine,
    RestSiteClient, SiteHeaderError, TomlConfig, Web,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting site-header CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli.command).await {
        tracing::error!("❌ {} failed: {}", command_name(&cli.command), e);
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = if e.is_config_error() {
            2
        } else if e.is_retryable() {
            3
        } else {
            1
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Extract { .. } => "Extraction",
        Command::Provision { .. } => "Provisioning",
    }
}

async fn run(command: &Command) -> Result<(), SiteHeaderError> {
    let config = TomlConfig::from_file(command.config_path())?;
    config.validate()?;

    let client = Arc::new(RestSiteClient::from_config(&config));
    tracing::debug!("Site request timeout: {:?}", client.timeout());
    let mut web = Web::new(client);
    let store = LocalTemplateStore::new(config.template_directory().to_string());
    let engine = ProvisioningEngine::with_default_handlers();

    match command {
        Command::Extract {
            output,
            template_id,
            ..
        } => {
            let creation_info = CreationInformation {
                template_id: template_id.clone(),
            };
            let template = engine.extract(&mut web, &creation_info).await?;

            let file_name = TokenParser::new()
                .with_token("templateid", &template.id)
                .with_token(
                    "timestamp",
                    &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
                )
                .parse_string(output);
            let path = store.save_template(&file_name, &template).await?;

            tracing::info!("📁 Template saved to: {}", path);
            println!("✅ Site header extracted");
            println!("📁 Template saved to: {}", path);
        }
        Command::Provision { template, .. } => {
            let template = store.load_template(template).await?;
            let applying_info = config.applying_information();

            let parser = engine.provision(&mut web, &template, &applying_info).await?;

            tracing::info!("Provisioning finished with {} tokens", parser.len());
            println!(
                "✅ Template '{}' applied to {}",
                template.id,
                config.site_url()
            );
        }
    }

    Ok(())
}
