use std::sync::Arc;

use anyhow::{bail, Result};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;

use crate::config::Config;
use crate::utils::{retry_with_backoff, RetryConfig};

// ============================================================================
// ScyllaDB Session Bootstrap
// ============================================================================

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS customers (
        id text PRIMARY KEY,
        name text,
        email text,
        created_at timestamp
    )",
    "CREATE TABLE IF NOT EXISTS customers_by_email (
        email text PRIMARY KEY,
        customer_id text
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id text PRIMARY KEY,
        name text,
        price_cents bigint,
        quantity int
    )",
    "CREATE TABLE IF NOT EXISTS products_by_name (
        name text PRIMARY KEY,
        product_id text
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id uuid PRIMARY KEY,
        customer_id text,
        customer_name text,
        customer_email text,
        customer_created_at timestamp,
        items text,
        created_at timestamp
    )",
    "CREATE TABLE IF NOT EXISTS outbox_messages (
        id uuid PRIMARY KEY,
        aggregate_id uuid,
        event_type text,
        topic text,
        payload text,
        created_at timestamp
    )",
];

/// Connect to the configured node, retrying with backoff, then make sure the
/// keyspace and tables exist and switch the session to the keyspace.
pub async fn connect(config: &Config) -> Result<Arc<Session>> {
    validate_keyspace(&config.keyspace)?;

    tracing::info!(node = %config.scylla_node, "Connecting to ScyllaDB...");

    let retry = RetryConfig::default().with_max_attempts(config.connect_attempts);
    let session = retry_with_backoff("scylla_connect", retry, |_attempt| {
        let node = config.scylla_node.clone();
        async move { SessionBuilder::new().known_node(node).build().await }
    })
    .await?;

    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                 {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
                config.keyspace, config.replication_factor
            ),
            (),
        )
        .await?;

    session.use_keyspace(&config.keyspace, false).await?;

    for ddl in TABLES {
        session.query_unpaged(*ddl, ()).await?;
    }

    tracing::info!(keyspace = %config.keyspace, tables = TABLES.len(), "ScyllaDB schema ready");

    Ok(Arc::new(session))
}

/// Keyspace names are interpolated into CQL, so only plain identifiers pass
fn validate_keyspace(keyspace: &str) -> Result<()> {
    let valid = !keyspace.is_empty()
        && keyspace.len() <= 48
        && keyspace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && keyspace.chars().next().is_some_and(|c| c.is_ascii_alphabetic());

    if !valid {
        bail!("Invalid keyspace name: {:?}", keyspace);
    }
    Ok(())
}
