use std::io;

use nexmo::{Client, Credentials, Msisdn};
use serde_json::json;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key = required("NEXMO_API_KEY")?;
    let secret = required("NEXMO_API_SECRET")?;
    let to = Msisdn::parse(None, required("NEXMO_TO")?)?;
    let from = std::env::var("NEXMO_FROM").unwrap_or_else(|_| "Nexmo".to_owned());
    let text = std::env::var("NEXMO_TEXT")
        .unwrap_or_else(|_| "Hello from the nexmo demo.".to_owned());

    let client = Client::new(Credentials::key_secret(key, secret)?);
    let result = client
        .sms()
        .send(&json!({"from": from, "to": to, "text": text}))
        .await?;

    match result.into_result() {
        Ok(message) => println!(
            "message-id: {}, remaining balance: {:?}",
            message.message_id, message.remaining_balance
        ),
        Err(error) => println!("rejected: {error}"),
    }
    Ok(())
}
