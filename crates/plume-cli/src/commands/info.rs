//! Configuration summary command.

use plume_client::{ChatService, ClientConfig};

pub(crate) fn run() -> miette::Result<()> {
    let config = ClientConfig::from_env();

    println!("Plume Configuration");
    println!("===================");
    println!(
        "mode:          {}",
        if config.hosted { "hosted" } else { "local" }
    );
    println!("ollama url:    {}", config.ollama_url);
    println!(
        "tunnel url:    {}",
        config.tunnel_url.as_deref().unwrap_or("(not set)")
    );
    println!("model:         {}", config.model);
    println!("temperature:   {}", config.temperature);
    println!("max tokens:    {}", config.max_tokens);
    println!("openai:        {}", mask(&config.openai_api_key));
    println!("anthropic:     {}", mask(&config.anthropic_api_key));
    println!("huggingface:   {}", mask(&config.huggingface_api_key));

    let service = ChatService::new(&config);
    println!();
    println!("fallback order: {}", service.provider_names().join(" -> "));

    Ok(())
}

/// Show the first few characters of a key without revealing the rest.
fn mask(key: &Option<String>) -> String {
    match key {
        Some(key) if key.len() > 8 => {
            let prefix: String = key.chars().take(4).collect();
            format!("{}... (set)", prefix)
        }
        Some(_) => "(set)".to_string(),
        None => "(not set)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(&None), "(not set)");
        assert_eq!(mask(&Some("short".to_string())), "(set)");
        assert_eq!(
            mask(&Some("sk-abcdef1234567890".to_string())),
            "sk-a... (set)"
        );
    }
}
