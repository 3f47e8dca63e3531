use std::sync::Arc;
use std::time::Duration;

use bson::doc;
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use tokio::sync::OnceCell;

use crate::{config::Config, errors::AppResult};

/// Handle to the document store. Cheap to clone; all clones share one lazily
/// established client. Concurrent first uses await the same in-flight
/// connection attempt instead of racing to open duplicates.
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    conn_string: String,
    db_name: String,
    client: OnceCell<Client>,
}

impl Database {
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                conn_string: config.mongo_conn_string.clone(),
                db_name: config.mongo_db_name.clone(),
                client: OnceCell::new(),
            }),
        }
    }

    /// Establishes the connection on first use and reuses it afterwards.
    pub async fn connect(&self) -> AppResult<&Client> {
        self.inner
            .client
            .get_or_try_init(|| async {
                let mut client_options = ClientOptions::parse(&self.inner.conn_string).await?;

                let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
                client_options.server_api = Some(server_api);
                client_options.max_pool_size = Some(10);
                client_options.min_pool_size = Some(2);
                client_options.connect_timeout = Some(Duration::from_secs(5));
                client_options.server_selection_timeout = Some(Duration::from_secs(5));

                let client = Client::with_options(client_options)?;

                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 })
                    .await?;

                log::info!("Successfully connected to MongoDB");

                Ok(client)
            })
            .await
    }

    pub async fn collection<T>(&self, collection_name: &str) -> AppResult<Collection<T>>
    where
        T: Send + Sync,
    {
        let client = self.connect().await?;
        Ok(client
            .database(&self.inner.db_name)
            .collection(collection_name))
    }

    pub fn db_name(&self) -> &str {
        &self.inner.db_name
    }
}
