//! One-shot prompt command.

use plume_chat::{ChatRequest, Message};
use plume_client::{ChatService, ClientConfig};
use plume_markdown::Renderer;

pub(crate) async fn run(prompt: &str, model: Option<String>, raw: bool) -> miette::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(model) = model {
        config.model = model;
    }

    let service = ChatService::new(&config);

    let mut request = ChatRequest::new(vec![Message::user(prompt)]);
    request.model = Some(config.model.clone());
    request.temperature = Some(config.temperature);
    request.max_tokens = Some(config.max_tokens);

    let reply = service.send(&request).await;

    if raw {
        println!("{}", reply.message.content);
    } else {
        print!("{}", Renderer::new().render(&reply.message.content));
    }

    Ok(())
}
