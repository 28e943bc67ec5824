use std::io::{self, BufRead, Write};

use nexmo::{Client, Credentials};
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
    let client = Client::new(Credentials::key_secret(
        required("NEXMO_API_KEY")?,
        required("NEXMO_API_SECRET")?,
    )?);
    let number = required("NEXMO_TO")?;

    let started = match client
        .verify()
        .request(&json!({"number": number, "brand": "Nexmo demo"}))
        .await?
        .into_result()
    {
        Ok(started) => started,
        Err(error) => {
            println!("verification not started: {error}");
            return Ok(());
        }
    };

    print!("code: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let checked = client
        .verify()
        .check(&json!({"request_id": started.request_id, "code": code.trim()}))
        .await?;
    match checked.into_result() {
        Ok(check) => println!("verified, event {}", check.event_id),
        Err(error) => println!("not verified: {error}"),
    }
    Ok(())
}
