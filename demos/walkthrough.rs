use std::io;

use elibom::{Credentials, ElibomClient};
use serde_json::{Map, Value};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn pretty_print(fields: &Map<String, Value>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(fields)?);
    Ok(())
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
    let scheduled_date = std::env::var("ELIBOM_SCHEDULED_DATE")
        .unwrap_or_else(|_| "2099-01-01 00:00".to_owned());

    let client = ElibomClient::new(Credentials::new(user, token)?);

    let delivery_token = client.send_message(&destination, "test message").await?;
    let delivery = client.show_delivery(&delivery_token).await?;
    pretty_print(delivery.fields())?;

    let schedule_id = client
        .schedule_message(&destination, "test message", &scheduled_date)
        .await?;
    for schedule in client.list_schedules().await? {
        pretty_print(schedule.fields())?;
    }
    let cancelled = client.cancel_schedule(&schedule_id).await?;
    println!("cancelled schedule {cancelled}");

    let account = client.show_account().await?;
    pretty_print(account.fields())?;

    let users = client.show_users().await?;
    for user in &users {
        pretty_print(user.fields())?;
    }
    if let Some(user_id) = users.first().and_then(|user| user.id()) {
        let user = client.show_user(&user_id).await?;
        pretty_print(user.fields())?;
    }

    Ok(())
}
