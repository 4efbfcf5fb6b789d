use openrouter_responses::{Client, EasyInputMessage, OpenRouterError, OutputItem, Request};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 1. Reads OPENROUTER_API_KEY
    let client = Client::from_env()?;

    let model_name = "openai/gpt-4o-mini";
    let prompt = "Explain the concept of recursion in programming in one paragraph.";

    println!("Creating response with model: {model_name}");
    println!("Prompt: {prompt}\n");

    // 2. A system instruction followed by the user's question
    let request = Request::new()
        .with_model(model_name)
        .push_item(EasyInputMessage::system("Answer in plain prose."))
        .push_item(EasyInputMessage::user(prompt));

    match client.create_response(&request).await {
        Ok(response) => {
            println!("--- Response ---");
            for item in response.items() {
                match item {
                    OutputItem::Reasoning(r) => {
                        for line in &r.summary {
                            println!("[Reasoning] {line}");
                        }
                    }
                    OutputItem::Message(m) => println!("{}", m.text()),
                    other => println!("[{}]", other.type_name()),
                }
            }
            for refusal in response.refusals() {
                println!("[Refusal] {refusal}");
            }
            println!("--- End Response ---");
        }
        Err(OpenRouterError::Api {
            status_code,
            message,
            ..
        }) => {
            eprintln!("API error (status {status_code:?}): {message}");
        }
        Err(OpenRouterError::Wire(e)) => {
            eprintln!("Response did not match the typed model: {e}");
        }
        Err(e) => eprintln!("Error: {e}"),
    }

    Ok(())
}
