use openrouter_responses::{Client, EasyInputMessage, FunctionCallOutput, Request};
use serde_json::json;
use std::error::Error;

fn get_weather(city: &str) -> serde_json::Value {
    json!({"city": city, "temperature_c": 21, "conditions": "sunny"})
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = Client::from_env()?;
    let model_name = "openai/gpt-4o-mini";

    // Tool declarations are not part of the typed model; this demo echoes a
    // function call the model already made and answers it.
    let mut request = Request::new()
        .with_model(model_name)
        .push_item(EasyInputMessage::user("What's the weather in Paris?"));

    let response = client.create_response(&request).await?;
    let calls: Vec<_> = response.function_calls().cloned().collect();
    if calls.is_empty() {
        println!("{}", response.output_text().unwrap_or_default());
        return Ok(());
    }

    for item in response.into_input_items() {
        request = request.push_item(item);
    }
    for call in calls {
        let args = call.parsed_arguments()?;
        let city = args["city"].as_str().unwrap_or("unknown");
        println!("Model called {}({city})", call.name);
        request = request.push_item(FunctionCallOutput::new(
            call.call_id,
            get_weather(city).to_string(),
        ));
    }

    let final_response = client.create_response(&request).await?;
    println!("{}", final_response.output_text().unwrap_or_default());
    Ok(())
}
