use std::io;

use clickatell::{ClickatellClient, Credentials, TracingLogger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let token = std::env::var("CLICKATELL_AUTH_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_AUTH_TOKEN environment variable is required",
        )
    })?;
    let phone = std::env::var("CLICKATELL_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clickatell demo.".to_owned());

    let client = ClickatellClient::builder(Credentials::new(token)?)
        .logger(TracingLogger)
        .build()?;

    let response = client.send_message(message, [phone]).await?;
    for message in &response.messages {
        println!(
            "to: {}, api_message_id: {:?}, accepted: {:?}",
            message.to, message.api_message_id, message.accepted
        );
    }

    Ok(())
}
