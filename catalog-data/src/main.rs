use std::env;

use anyhow::{anyhow, Context};
use catalog_data::{CatalogConfig, Explorer};
use dotenv::dotenv;
use shared_types::MapQuery;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum CatalogAction {
    Nearby,
    Search,
    Coords,
}

impl CatalogAction {
    fn new(action: &str) -> anyhow::Result<Self> {
        match action {
            "NEARBY" => Ok(Self::Nearby),
            "SEARCH" => Ok(Self::Search),
            "COORDS" => Ok(Self::Coords),
            other => Err(anyhow!("Invalid action '{}', expected NEARBY, SEARCH or COORDS", other)),
        }
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_data=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let action = required("ACTION")?;
    let config = CatalogConfig::from_env();
    let explorer = Explorer::from_config(&config)
        .with_context(|| format!("loading catalogs from {}", config.data_dir.display()))?;

    let output = match CatalogAction::new(&action)? {
        CatalogAction::Nearby => {
            let query = MapQuery::from_params(|key| env::var(key.to_uppercase()).ok())?;
            serde_json::to_string_pretty(&explorer.build_map_page(&query).await?)?
        }
        CatalogAction::Search => {
            let query = required("QUERY")?;
            serde_json::to_string_pretty(&explorer.search_places(&query).await?)?
        }
        CatalogAction::Coords => {
            let qid = required("QID")?;
            serde_json::to_string_pretty(&explorer.place_coordinates(&qid).await?)?
        }
    };

    println!("{}", output);
    Ok(())
}
