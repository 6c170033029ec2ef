use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::workflow::collaborators::{IdempotencyStore, ResumeIdentity};

/// Processed resume hashes, one Redis set per campaign.
pub struct RedisIdempotencyStore {
    conn: MultiplexedConnection,
}

impl RedisIdempotencyStore {
    pub async fn connect(client: &redis::Client) -> Result<Self> {
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("Connecting to Redis")?;
        Ok(Self { conn })
    }
}

pub fn processed_key(campaign: &str) -> String {
    format!("screener:processed:{campaign}")
}

#[async_trait]
impl IdempotencyStore for RedisIdempotencyStore {
    async fn is_processed(&self, identity: &ResumeIdentity) -> Result<bool> {
        let mut conn = self.conn.clone();
        let member: bool = conn
            .sismember(processed_key(&identity.campaign), &identity.content_hash)
            .await
            .context("SISMEMBER on processed set")?;
        Ok(member)
    }

    async fn mark_processed(&self, identity: &ResumeIdentity) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .sadd(processed_key(&identity.campaign), &identity.content_hash)
            .await
            .context("SADD on processed set")?;
        Ok(())
    }
}
