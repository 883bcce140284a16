use crate::error::{RegistryError, Result};
use crate::student::{NewStudent, Student};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info, warn};

const CREATE_STUDENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    ra TEXT NOT NULL UNIQUE
)";

/// StudentStore is the data-access layer over the `students` table
#[derive(Clone)]
pub struct StudentStore {
    pool: SqlitePool,
}

impl StudentStore {
    /// Open a pool against `database_url` and make sure the schema exists
    ///
    /// # Arguments
    /// * `database_url` - SQLite connection string (e.g., "sqlite://students.db")
    /// * `max_connections` - Upper bound on pooled connections
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to store at: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;

        Ok(store)
    }

    /// Wrap an existing pool without touching the schema
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `students` table if it is absent
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_STUDENTS_TABLE)
            .execute(&self.pool)
            .await?;

        debug!("students table ready");

        Ok(())
    }

    /// Insert a student in its own transaction
    ///
    /// A duplicate `ra` surfaces as `RegistryError::Conflict` and the
    /// transaction is rolled back before returning.
    pub async fn insert(&self, student: &NewStudent) -> Result<Student> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query("INSERT INTO students (name, ra) VALUES (?, ?)")
            .bind(&student.name)
            .bind(&student.ra)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(done) => {
                tx.commit().await?;

                Ok(Student {
                    id: done.last_insert_rowid(),
                    name: student.name.clone(),
                    ra: student.ra.clone(),
                })
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!("Failed to roll back insert of RA {}: {}", student.ra, rollback);
                }
                Err(RegistryError::from_insert(e, &student.ra))
            }
        }
    }

    /// Get all students ordered by id
    pub async fn list(&self) -> Result<Vec<Student>> {
        debug!("Listing all students");

        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, ra FROM students ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> StudentStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = StudentStore::from_pool(pool);
        store.migrate().await.unwrap();
        store
    }

    fn new_student(name: &str, ra: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            ra: ra.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = memory_store().await;
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = memory_store().await;

        let ana = store.insert(&new_student("Ana", "123")).await.unwrap();
        let bea = store.insert(&new_student("Bea", "456")).await.unwrap();

        assert_eq!(ana.id, 1);
        assert_eq!(bea.id, 2);
        assert_eq!(store.list().await.unwrap(), vec![ana, bea]);
    }

    #[tokio::test]
    async fn test_duplicate_ra_is_conflict() {
        let store = memory_store().await;

        store.insert(&new_student("Ana", "123")).await.unwrap();
        let err = store.insert(&new_student("Bea", "123")).await.unwrap_err();

        assert!(matches!(err, RegistryError::Conflict(ref ra) if ra == "123"));
        let students = store.list().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_connection_usable_after_conflict() {
        let store = memory_store().await;

        store.insert(&new_student("Ana", "123")).await.unwrap();
        store.insert(&new_student("Bea", "123")).await.unwrap_err();

        // Single pooled connection: a dangling transaction would block this insert.
        let carla = store.insert(&new_student("Carla", "789")).await.unwrap();
        assert_eq!(carla.ra, "789");
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_conflict() {
        let store = memory_store().await;

        let ana = store.insert(&new_student("Ana", "123")).await.unwrap();
        store.insert(&new_student("Bea", "123")).await.unwrap_err();
        let carla = store.insert(&new_student("Carla", "789")).await.unwrap();

        assert!(carla.id > ana.id);
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = memory_store().await;
        store.insert(&new_student("Ana", "123")).await.unwrap();

        store.migrate().await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_store_unavailable() {
        let store = memory_store().await;
        store.close().await;

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, RegistryError::StoreUnavailable(_)));
    }
}
