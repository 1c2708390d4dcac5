mod in_memory_message_store;
mod pg_message_store;
mod pg_pool;

pub use in_memory_message_store::InMemoryMessageStore;
pub use pg_message_store::PgMessageStore;
pub use pg_pool::{create_pool, run_migrations};
