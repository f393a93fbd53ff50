use std::io;

use elibom::{Credentials, ElibomClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let user = required_env("ELIBOM_USER")?;
    let token = required_env("ELIBOM_API_TOKEN")?;
    let destination = required_env("ELIBOM_DESTINATION")?;
    let text = std::env::var("ELIBOM_MESSAGE")
        .unwrap_or_else(|_| "Hello from the elibom demo.".to_owned());

    let client = ElibomClient::new(Credentials::new(user, token)?);
    let delivery_token = client.send_message(&destination, &text).await?;
    println!("delivery token: {delivery_token}");

    Ok(())
}
