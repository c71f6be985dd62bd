//! `stars`: command-line front end for the profile directory.
//!
//! ```text
//! stars                      list profiles (default)
//! stars list
//! stars create key=value...  e.g. name="Jane Doe" dob=1990-05-01 rating=4.5
//! stars delete <id>
//! ```

use anyhow::{bail, Context};
use shared::{Notification, NotificationKind, ProfileCard, ProfileField};
use star_client::domain::RecordingNotificationSink;
use star_client::{
    ClientConfig, HttpProfileGateway, ProfileCardService, ProfileFormController, ProfileSession,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Session = ProfileSession<HttpProfileGateway, RecordingNotificationSink>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    info!("🚀 Using star collection at {}", config.api_base_url);

    let gateway = HttpProfileGateway::new(&config)?;
    let session = ProfileSession::new(gateway, RecordingNotificationSink::new())
        .with_card_service(
            ProfileCardService::with_bio_excerpt_chars(config.bio_excerpt_chars)
                .with_image_base_url(&config.api_base_url),
        );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("list");

    let outcome = match command {
        "list" => list(&session).await,
        "create" => create(&session, &args[1..]).await,
        "delete" => match args.get(1) {
            Some(id) => delete(&session, id).await,
            None => Err(anyhow::anyhow!("usage: stars delete <id>")),
        },
        other => Err(anyhow::anyhow!(
            "unknown command '{}' (expected list, create or delete)",
            other
        )),
    };

    print_notifications(&session.notifier().take());
    outcome
}

async fn list(session: &Session) -> anyhow::Result<()> {
    session.bootstrap().await?;
    let cards = session.cards();
    if cards.is_empty() {
        println!("No profiles yet.");
    }
    for card in &cards {
        print_card(card);
    }
    Ok(())
}

async fn create(session: &Session, assignments: &[String]) -> anyhow::Result<()> {
    let mut form = ProfileFormController::new();
    for assignment in assignments {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("expected key=value, got '{}'", assignment);
        };
        form.set_field_by_name(name, value)?;
    }

    match session.submit_form(&mut form).await? {
        Some(profile) => {
            println!("Created {} ({})", profile.name(), profile.id);
            Ok(())
        }
        None => {
            for field in ProfileField::ALL {
                for message in form.field_errors(field) {
                    eprintln!("  {}: {}", field, message);
                }
            }
            bail!("profile form has errors")
        }
    }
}

async fn delete(session: &Session, id: &str) -> anyhow::Result<()> {
    // Deletes address profiles in the local collection, so load it first
    session.bootstrap().await?;
    session.delete_profile(id).await?;
    Ok(())
}

fn print_card(card: &ProfileCard) {
    println!("{}  [{}]", card.title, card.id);
    if !card.image_url.is_empty() {
        println!("  Image {}", card.image_url);
    }
    println!("  Born {}  Rating {:.1} ({:.0}%)", card.date_label, card.rating, card.rating_percent);
    if !card.bio_excerpt.is_empty() {
        println!("  {}", card.bio_excerpt);
    }
    for link in &card.links {
        println!("  {}: {}", link.label, link.url);
    }
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Failure => "✖",
        };
        println!("{} {}", marker, notification.title);
        println!("  {}", notification.description);
    }
}
