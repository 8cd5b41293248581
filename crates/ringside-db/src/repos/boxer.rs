//! Boxer repository

use async_trait::async_trait;
use ringside_types::{
    Boxer, BoxerId, BoxerRecord, BoxerStore, FightOutcome, NewBoxer, StoreError, StoreResult,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::{DbBoxer, DbError, DbResult, BOXERS_TABLE};

const BOXER_COLUMNS: &str = "id, name, weight, height, reach, age, fights, wins, created_at";

/// Boxer repository backed by the `boxers` table
#[derive(Clone)]
pub struct BoxerRepo {
    pool: SqlitePool,
}

impl BoxerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new boxer with zeroed stats
    pub async fn create(&self, boxer: &NewBoxer) -> DbResult<DbBoxer> {
        let query = format!(
            r#"
            INSERT INTO boxers (name, weight, height, reach, age)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {}
            "#,
            BOXER_COLUMNS
        );

        let row = sqlx::query_as::<_, DbBoxer>(&query)
            .bind(boxer.name())
            .bind(boxer.weight())
            .bind(boxer.height())
            .bind(boxer.reach())
            .bind(boxer.age())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return DbError::Duplicate(format!(
                            "Boxer with name '{}'",
                            boxer.name()
                        ));
                    }
                }
                DbError::Query(e)
            })?;

        info!(id = row.id, name = %row.name, "Boxer created");
        Ok(row)
    }

    /// Find boxer by ID
    pub async fn find_by_id(&self, id: BoxerId) -> DbResult<Option<DbBoxer>> {
        let query = format!("SELECT {} FROM boxers WHERE id = ?1", BOXER_COLUMNS);
        let row = sqlx::query_as::<_, DbBoxer>(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Find boxer by exact name
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<DbBoxer>> {
        let query = format!("SELECT {} FROM boxers WHERE name = ?1", BOXER_COLUMNS);
        let row = sqlx::query_as::<_, DbBoxer>(&query)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Permanently delete a boxer
    pub async fn delete(&self, id: BoxerId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM boxers WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(%id, "Delete of unknown boxer");
            return Err(DbError::NotFound(format!("Boxer with ID {}", id)));
        }

        info!(%id, "Boxer deleted");
        Ok(())
    }

    /// Record one fight in a single statement
    pub async fn record_fight(&self, id: BoxerId, outcome: FightOutcome) -> DbResult<()> {
        let result = sqlx::query("UPDATE boxers SET fights = fights + 1, wins = wins + ?2 WHERE id = ?1")
            .bind(id.as_i64())
            .bind(outcome.win_increment())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Boxer with ID {}", id)));
        }

        debug!(%id, %outcome, "Stats updated");
        Ok(())
    }

    /// Boxers with at least one fight, ordered by id
    pub async fn list_with_fights(&self) -> DbResult<Vec<DbBoxer>> {
        let query = format!(
            "SELECT {} FROM boxers WHERE fights > 0 ORDER BY id",
            BOXER_COLUMNS
        );
        let rows = sqlx::query_as::<_, DbBoxer>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Verify the connection works and the table is present
    pub async fn ping(&self) -> DbResult<()> {
        let table: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(BOXERS_TABLE)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DbError::Connection(e.to_string()))?;

        match table {
            Some(_) => Ok(()),
            None => Err(DbError::MissingTable(BOXERS_TABLE.to_string())),
        }
    }
}

#[async_trait]
impl BoxerStore for BoxerRepo {
    async fn create_boxer(&self, boxer: &NewBoxer) -> StoreResult<Boxer> {
        let row = self.create(boxer).await?;
        Ok(row.to_boxer()?)
    }

    async fn delete_boxer(&self, id: BoxerId) -> StoreResult<()> {
        Ok(self.delete(id).await?)
    }

    async fn get_boxer_by_id(&self, id: BoxerId) -> StoreResult<Boxer> {
        match self.find_by_id(id).await? {
            Some(row) => Ok(row.to_boxer()?),
            None => Err(StoreError::boxer_id_not_found(id)),
        }
    }

    async fn get_boxer_by_name(&self, name: &str) -> StoreResult<Boxer> {
        match self.find_by_name(name).await? {
            Some(row) => Ok(row.to_boxer()?),
            None => Err(StoreError::boxer_name_not_found(name)),
        }
    }

    async fn update_stats(&self, id: BoxerId, outcome: FightOutcome) -> StoreResult<()> {
        Ok(self.record_fight(id, outcome).await?)
    }

    async fn list_with_fights(&self) -> StoreResult<Vec<BoxerRecord>> {
        let rows = BoxerRepo::list_with_fights(self).await?;
        let records = rows
            .into_iter()
            .map(DbBoxer::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(self.ping().await?)
    }
}
