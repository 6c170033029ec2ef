//! Concrete collaborators for the workflow: S3 documents, Redis dedup,
//! the Postgres verdict table and the mail relay.

pub mod notifier;
pub mod pdf;
pub mod pg_sink;
pub mod redis_store;
pub mod s3_source;

pub use notifier::WebhookNotifier;
pub use pg_sink::{ensure_schema, PgVerdictSink};
pub use redis_store::RedisIdempotencyStore;
pub use s3_source::S3DocumentSource;
