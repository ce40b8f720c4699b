use clap::{Parser, ValueEnum};

/// Backing store for the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Memory,
    Scylla,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Scylla => "scylla",
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "order-service")]
#[command(about = "Customer, catalog and order use cases over pluggable storage")]
pub struct Config {
    #[arg(long, env = "ORDER_SERVICE_STORAGE", value_enum, default_value = "memory")]
    pub storage: StorageBackend,

    #[arg(long, env = "SCYLLA_NODE", default_value = "127.0.0.1:9042")]
    pub scylla_node: String,

    #[arg(long, env = "SCYLLA_KEYSPACE", default_value = "orders_ks")]
    pub keyspace: String,

    #[arg(long, env = "SCYLLA_REPLICATION_FACTOR", default_value = "1")]
    pub replication_factor: u32,

    #[arg(long, env = "SCYLLA_CONNECT_ATTEMPTS", default_value = "5")]
    pub connect_attempts: u32,

    #[arg(long, env = "METRICS_PORT", default_value = "9090")]
    pub metrics_port: u16,
}
