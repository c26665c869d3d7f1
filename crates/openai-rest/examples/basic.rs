//! Run this example with `OPENAI_API_KEY=`

use openai_rest::{
    endpoints::chat::{ChatCompletion, ChatModel},
    system_message, user_message, Config, HttpLogger, LogLevel, OpenAI, TracingLogger,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("OPENAI_API_KEY")?;
    let logger: Arc<dyn HttpLogger> = Arc::new(TracingLogger::new(LogLevel::Body));
    let client = OpenAI::new(
        Config::api_key(api_key)
            .loggers(vec![logger])
            .build(),
    )?;

    let chat_completion = ChatCompletion::model(ChatModel::Gpt35Turbo)
        .messages(vec![
            system_message!("Extract the first and last name from the provided message."),
            user_message!("Hello, my name is John Doe."),
        ])
        .temperature(0.1)
        .build();

    let name = client
        .chat_completion(&chat_completion)
        .await?
        .take_first_choice()
        .ok_or("no choices")?
        .message();

    println!("{name}");
    Ok(())
}
