use {
    clap::Subcommand,
    steeple_config::{ChannelEntry, SteepleConfig},
    steeple_youtube::{Resolution, YoutubeClient, is_stable_channel_id, resolve_channel},
};

#[derive(Subcommand)]
pub enum ChannelAction {
    /// Print the effective channel registry.
    List,
    /// Resolve a handle or channel ID the way a sync pass would.
    Resolve {
        /// A handle (with or without `@`) or a stable `UC…` channel ID.
        query: String,
    },
}

pub async fn handle(action: ChannelAction, config: &SteepleConfig) -> anyhow::Result<()> {
    match action {
        ChannelAction::List => {
            list(config);
            Ok(())
        },
        ChannelAction::Resolve { query } => resolve(config, &query).await,
    }
}

fn list(config: &SteepleConfig) {
    let channels = config.effective_channels();
    println!("{:<34} {:<26} HANDLE", "NAME", "ID");
    for entry in &channels {
        println!(
            "{:<34} {:<26} {}",
            entry.name,
            entry.id.as_deref().unwrap_or("-"),
            entry.handle.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} channels tracked.", channels.len());
}

async fn resolve(config: &SteepleConfig, query: &str) -> anyhow::Result<()> {
    crate::require_valid(config)?;

    let client = YoutubeClient::new(config.youtube.api_key.clone())?;
    let entry = entry_from_query(query);
    match resolve_channel(&client, &entry).await {
        Resolution::Resolved(id) => println!("{query} -> {id}"),
        Resolution::NotFound => {
            println!("{query} did not resolve to any channel.");
        },
    }
    Ok(())
}

/// An ad-hoc registry entry for the operator's query string.
fn entry_from_query(query: &str) -> ChannelEntry {
    if is_stable_channel_id(query) {
        ChannelEntry {
            id: Some(query.to_string()),
            handle: None,
            name: query.to_string(),
        }
    } else {
        ChannelEntry {
            id: None,
            handle: Some(query.to_string()),
            name: query.to_string(),
        }
    }
}
