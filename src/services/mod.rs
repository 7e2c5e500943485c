use crate::config::Config;
use crate::models::User;
use anyhow::Context;
use mongodb::{bson::doc, options::IndexOptions, Client as MongoClient, Database, IndexModel};

pub struct AppState {
    pub config: Config,
    pub client: MongoClient,
    pub mongo: Database,
}

impl AppState {
    pub async fn new(config: Config, client: MongoClient) -> anyhow::Result<Self> {
        let mongo = client.database(&config.mongo_database);

        tracing::info!("Preparing database: indexes and seed data");
        ensure_user_indexes(&mongo).await?;
        problem_seed::bootstrap(&mongo).await?;

        Ok(Self {
            config,
            client,
            mongo,
        })
    }
}

/// Unique sparse indexes on users.tg_id and users.email. Uniqueness of both
/// login keys rests entirely on these; `UserService::resolve_or_create_by_tg`
/// relies on the duplicate-key rejection to settle concurrent first creations.
async fn ensure_user_indexes(mongo: &Database) -> anyhow::Result<()> {
    let users = mongo.collection::<User>("users");

    let tg_index = IndexModel::builder()
        .keys(doc! { "tg_id": 1 })
        .options(IndexOptions::builder().unique(true).sparse(true).build())
        .build();
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).sparse(true).build())
        .build();

    users
        .create_indexes(vec![tg_index, email_index])
        .await
        .context("Failed to create user uniqueness indexes")?;

    tracing::debug!("User uniqueness indexes ensured");
    Ok(())
}

pub mod error;
pub mod problem_seed;
pub mod problem_service;
pub mod solution_service;
pub mod stats_service;
pub mod task_service;
pub mod user_service;
