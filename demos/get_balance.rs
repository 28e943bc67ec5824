use std::io;

use nexmo::{Client, Credentials};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key = std::env::var("NEXMO_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_API_KEY environment variable is required",
        )
    })?;
    let secret = std::env::var("NEXMO_API_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_API_SECRET environment variable is required",
        )
    })?;

    let client = Client::new(Credentials::key_secret(key, secret)?);
    match client.account().balance().await?.into_result() {
        Ok(balance) => println!("balance: {}", balance.as_str()),
        Err(error) => println!("balance unavailable: {error}"),
    }
    Ok(())
}
