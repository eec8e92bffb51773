//! Interactive chat session.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use plume_chat::{ChatRequest, Message, Transcript};
use plume_client::{ChatService, ClientConfig, OllamaClient};
use plume_markdown::Renderer;

const WELCOME: &str = "Hello! I'm your AI assistant. How can I help you today?";

pub(crate) async fn run(model: Option<String>) -> miette::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(model) = model {
        config.model = model;
    }

    let service = ChatService::new(&config);
    let renderer = Renderer::new();
    let mut transcript = Transcript::new();

    // In local mode a missing server or model would otherwise only show up
    // after the first message.
    if !config.hosted {
        if let Err(e) = OllamaClient::from_config(&config).check_availability().await {
            println!("{}", format!("warning: {}", e).dark_grey());
        }
    }

    println!("{}", WELCOME);
    println!(
        "{}",
        "Type a message and press Enter. /quit exits.".dark_grey()
    );
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "you>".green());
        io::stdout()
            .flush()
            .map_err(|e| miette::miette!("Failed to flush stdout: {}", e))?;

        // EOF ends the session like /quit.
        let Some(line) = lines.next() else { break };
        let line = line.map_err(|e| miette::miette!("Failed to read input: {}", e))?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        transcript.push(Message::user(input));

        let mut request = ChatRequest::new(transcript.messages().to_vec());
        request.model = Some(config.model.clone());
        request.temperature = Some(config.temperature);
        request.max_tokens = Some(config.max_tokens);

        println!("{}", "thinking...".dark_grey());
        let reply = service.send(&request).await;

        if let Some(usage) = reply.usage {
            tracing::debug!(
                "tokens: {} prompt, {} completion",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        println!();
        print!("{}", renderer.render(&reply.message.content));
        println!();

        transcript.push(reply.message);
    }

    println!("bye!");
    Ok(())
}
