use crate::error::Result;
use crate::store::StudentStore;
use crate::student::{NewStudent, RegisterStudent, Student};
use tracing::{info, warn};

/// StudentRegistry validates registrations and delegates persistence to the store
#[derive(Clone)]
pub struct StudentRegistry {
    store: StudentStore,
}

impl StudentRegistry {
    pub fn new(store: StudentStore) -> Self {
        Self { store }
    }

    /// Register a student
    ///
    /// Input is validated before the store is touched. RA uniqueness is left
    /// to the store's constraint so concurrent registrations cannot race.
    pub async fn register(&self, request: RegisterStudent) -> Result<Student> {
        let new_student = NewStudent::parse(request).inspect_err(|e| {
            warn!("Rejected registration: {}", e);
        })?;

        let student = self.store.insert(&new_student).await?;

        info!(
            "Student {} registered with RA {} (id {})",
            student.name, student.ra, student.id
        );

        Ok(student)
    }

    /// All students in registration order
    pub async fn list(&self) -> Result<Vec<Student>> {
        let students = self.store.list().await?;

        info!("Found {} registered students", students.len());

        Ok(students)
    }
}
