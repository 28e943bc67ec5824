use std::io;

use nexmo::{Client, Credentials};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("NEXMO_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_TOKEN environment variable is required",
        )
    })?;

    let client = Client::new(Credentials::token(token)?);
    let mut page = client
        .calls()
        .list(&json!({"page_size": 10}))
        .await?
        .into_result()?;

    loop {
        for call in &page {
            println!("{} {}", call["uuid"], call["status"]);
        }
        match client.next_page(&page).await? {
            Some(next) => page = next.into_result()?,
            None => break,
        }
    }
    Ok(())
}
