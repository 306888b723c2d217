use async_trait::async_trait;
use redis::{AsyncCommands, Script, aio::MultiplexedConnection};
use std::time::Duration;

use crate::cache::ExpiringCache;

/// Key/value cache holding live OTP codes.
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous entry and its TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()>;

    async fn delete(&self, key: &str) -> anyhow::Result<()>;

    /// Atomically deletes the entry if its current value equals `expected`.
    /// Returns whether anything was deleted.
    async fn take_if_matches(&self, key: &str, expected: &str) -> anyhow::Result<bool>;
}

/// Process-local store, used when no Redis URL is configured.
#[derive(Clone, Default)]
pub struct MemoryOtpStore {
    entries: ExpiringCache<String>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get_data(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()> {
        self.entries.set_data(key, value.to_owned(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.delete_data(key);
        Ok(())
    }

    async fn take_if_matches(&self, key: &str, expected: &str) -> anyhow::Result<bool> {
        Ok(self.entries.take_if(key, |stored| stored == expected).is_some())
    }
}

const COMPARE_AND_DELETE: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

pub struct RedisOtpStore {
    conn: MultiplexedConnection,
    compare_and_delete: Script,
}

impl RedisOtpStore {
    pub async fn connect(redis_url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        tracing::info!("OTP store connected to redis");
        Ok(Self {
            conn,
            compare_and_delete: Script::new(COMPARE_AND_DELETE),
        })
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero expiry
        let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn take_if_matches(&self, key: &str, expected: &str) -> anyhow::Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = self
            .compare_and_delete
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }
}
