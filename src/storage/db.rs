use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::constants::{DATABASE_FILE_NAME, DEFAULT_DATABASE_URL};
use crate::entities;

/// SQLite-backed storage for all application data.
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Initialize storage with an in-memory database or the default
    /// on-disk database under the platform data directory.
    pub async fn new(in_memory: bool) -> Result<Self> {
        if in_memory {
            Self::connect(DEFAULT_DATABASE_URL).await
        } else {
            let data_dir = dirs::data_dir()
                .context("Could not determine platform data directory")?
                .join("venturist");
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
            let url = format!(
                "sqlite://{}?mode=rwc",
                data_dir.join(DATABASE_FILE_NAME).display()
            );
            Self::connect(&url).await
        }
    }

    /// Connect to a SQLite database by URL and initialize the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        // An in-memory database lives and dies with its connection, so
        // the pool must hold exactly one that is never reaped.
        if url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(4).min_connections(1);
        }
        options.sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {url}"))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Create all tables from the entity definitions.
    async fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_unprepared("PRAGMA foreign_keys = ON;")
            .await?;

        self.create_table(entities::User).await?;
        self.create_table(entities::Team).await?;
        self.create_table(entities::TeamMember).await?;
        self.create_table(entities::Project).await?;
        self.create_table(entities::Task).await?;
        self.create_table(entities::Subtask).await?;
        self.create_table(entities::Note).await?;

        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();
        self.conn.execute(backend.build(&statement)).await?;
        Ok(())
    }

    /// Check if the database has any data
    pub async fn has_data(&self) -> Result<bool> {
        use sea_orm::PaginatorTrait;
        let count = entities::User::find().count(&self.conn).await?;
        Ok(count > 0)
    }

    /// Clear all data from the database
    pub async fn clear_all_data(&self) -> Result<()> {
        entities::Subtask::delete_many().exec(&self.conn).await?;
        entities::Task::delete_many().exec(&self.conn).await?;
        entities::Project::delete_many().exec(&self.conn).await?;
        entities::TeamMember::delete_many().exec(&self.conn).await?;
        entities::Team::delete_many().exec(&self.conn).await?;
        entities::Note::delete_many().exec(&self.conn).await?;
        entities::User::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
