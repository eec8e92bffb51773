//! Connectivity probe command.

use plume_client::{ClientConfig, OllamaClient};

pub(crate) async fn run() -> miette::Result<()> {
    let config = ClientConfig::from_env();
    let target = config
        .tunnel_url
        .clone()
        .unwrap_or_else(|| config.ollama_url.clone());

    println!("Probing {} ...", target);

    let client = OllamaClient::from_config(&config).with_url(&target);
    match client.list_models().await {
        Ok(models) => {
            println!("Connected. {} model(s) available:", models.len());
            for model in &models {
                println!("  - {}", model);
            }
            if client.model_installed(&models) {
                println!("Model '{}' is installed.", client.model());
            } else {
                println!(
                    "Model '{}' is not installed. Pull it with: ollama pull {}",
                    client.model(),
                    client.model()
                );
            }
            Ok(())
        }
        Err(e) => Err(miette::miette!("Probe failed: {}", e)),
    }
}
