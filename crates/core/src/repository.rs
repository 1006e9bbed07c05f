//! Relational condition store.
//!
//! Conditions live in two tables: `conditions(id, name, advice)` and
//! `condition_symptoms(id, condition_id, symptom)`. The whole catalog is read with one
//! LEFT JOIN ordered by condition id and then symptom row id, so both the condition order
//! and each condition's symptom order are stable between loads.

use crate::catalog::{default_conditions, CatalogProvider};
use crate::condition::{Condition, ConditionName};
use crate::constants::DB_MAX_CONNECTIONS;
use crate::error::{CatalogError, CatalogResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

const LOAD_CONDITIONS_SQL: &str = "SELECT c.id, c.name, c.advice, cs.symptom \
     FROM conditions c \
     LEFT JOIN condition_symptoms cs ON c.id = cs.condition_id \
     ORDER BY c.id, cs.id";

/// One row of the catalog join. `symptom` is NULL for a condition without symptom rows.
#[derive(Debug, sqlx::FromRow)]
struct ConditionSymptomRow {
    id: i64,
    name: Option<String>,
    advice: Option<String>,
    symptom: Option<String>,
}

/// Accumulates the joined rows of one condition id.
struct PendingCondition {
    id: i64,
    name: ConditionName,
    advice: String,
    symptoms: Vec<String>,
}

impl PendingCondition {
    fn start(id: i64, name: Option<String>, advice: Option<String>) -> CatalogResult<Self> {
        let name = name
            .as_deref()
            .map(ConditionName::new)
            .transpose()
            .map_err(|e| CatalogError::InvalidRow {
                id,
                reason: e.to_string(),
            })?
            .ok_or_else(|| CatalogError::InvalidRow {
                id,
                reason: "condition name is NULL".into(),
            })?;

        Ok(Self {
            id,
            name,
            advice: advice.unwrap_or_default(),
            symptoms: Vec::new(),
        })
    }

    fn finish(self) -> Condition {
        Condition::new(self.name, self.symptoms, self.advice)
    }
}

/// Condition store backed by an SQLite pool.
#[derive(Clone, Debug)]
pub struct ConditionRepository {
    pool: SqlitePool,
}

impl ConditionRepository {
    /// Opens a pool for `database_url`, creating the SQLite file if it does not exist.
    ///
    /// In-memory databases are limited to a single connection so every query sees the
    /// same data.
    pub async fn connect(database_url: &str, acquire_timeout: Duration) -> CatalogResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(CatalogError::DatabaseUrl)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        let pool_options = if database_url.contains(":memory:") {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(DB_MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(CatalogError::Connect)?;

        tracing::debug!("connected to condition store");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> CatalogResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Loads every condition with its symptoms, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Query`] if the query fails and [`CatalogError::InvalidRow`]
    /// if a condition has a missing or blank name.
    pub async fn load_conditions(&self) -> CatalogResult<Vec<Condition>> {
        let rows = sqlx::query_as::<_, ConditionSymptomRow>(LOAD_CONDITIONS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogError::Query)?;

        let mut conditions = Vec::new();
        let mut current: Option<PendingCondition> = None;

        for row in rows {
            let ConditionSymptomRow {
                id,
                name,
                advice,
                symptom,
            } = row;

            if current.as_ref().map(|p| p.id) != Some(id) {
                if let Some(done) = current.take() {
                    conditions.push(done.finish());
                }
                current = Some(PendingCondition::start(id, name, advice)?);
            }

            if let (Some(pending), Some(symptom)) = (current.as_mut(), symptom) {
                pending.symptoms.push(symptom);
            }
        }

        if let Some(done) = current {
            conditions.push(done.finish());
        }

        Ok(conditions)
    }

    /// Inserts a condition and its symptom rows in one transaction, returning its id.
    pub async fn insert_condition(&self, condition: &Condition) -> CatalogResult<i64> {
        let mut tx = self.pool.begin().await.map_err(CatalogError::Write)?;

        let id = sqlx::query("INSERT INTO conditions (name, advice) VALUES (?, ?)")
            .bind(condition.name().as_str())
            .bind(condition.advice())
            .execute(&mut *tx)
            .await
            .map_err(CatalogError::Write)?
            .last_insert_rowid();

        for symptom in condition.symptoms() {
            sqlx::query("INSERT INTO condition_symptoms (condition_id, symptom) VALUES (?, ?)")
                .bind(id)
                .bind(symptom)
                .execute(&mut *tx)
                .await
                .map_err(CatalogError::Write)?;
        }

        tx.commit().await.map_err(CatalogError::Write)?;
        Ok(id)
    }

    pub async fn count_conditions(&self) -> CatalogResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conditions")
            .fetch_one(&self.pool)
            .await
            .map_err(CatalogError::Query)?;
        Ok(row.0)
    }

    /// Writes the built-in catalog into an empty store. Returns how many conditions were
    /// inserted (zero when the store already has data).
    pub async fn seed_defaults(&self) -> CatalogResult<usize> {
        let existing = self.count_conditions().await?;
        if existing > 0 {
            tracing::info!(existing, "condition store already populated, not seeding");
            return Ok(0);
        }

        let defaults = default_conditions();
        for condition in &defaults {
            self.insert_condition(condition).await?;
        }

        tracing::info!(count = defaults.len(), "seeded condition store with defaults");
        Ok(defaults.len())
    }
}

impl CatalogProvider for ConditionRepository {
    async fn load_catalog(&self) -> CatalogResult<Vec<Condition>> {
        self.load_conditions().await
    }
}
