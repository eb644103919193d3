//! PostgreSQL-backed `CategoryRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Lifecycle;
use crate::domain::catalog::Category;
use crate::domain::catalog::category::{RootCategory, Subcategory};
use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};

use super::error_mapping::{DbFailure, classify};
use super::lifecycle_from_label;
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
///
/// The `categories.name` unique constraint backs the duplicate-name
/// invariant; its violation is surfaced as
/// [`CategoryRepositoryError::DuplicateName`].
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CategoryRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: &diesel::result::Error, name: &str) -> CategoryRepositoryError {
    match classify(error) {
        DbFailure::UniqueViolation => CategoryRepositoryError::duplicate_name(name),
        DbFailure::Connection(message) => CategoryRepositoryError::connection(message),
        DbFailure::Other(message) => CategoryRepositoryError::query(message),
    }
}

fn map_read_error(error: &diesel::result::Error) -> CategoryRepositoryError {
    // Reads cannot hit the unique constraint; reuse the write mapping with a
    // placeholder name that never surfaces.
    map_diesel_error(error, "")
}

fn row_to_category(row: CategoryRow) -> Category {
    let lifecycle = lifecycle_from_label(&row.lifecycle, "category", row.id);
    match row.parent_id {
        None => Category::Root(RootCategory {
            id: row.id,
            name: row.name,
            lifecycle,
        }),
        Some(parent_id) => Category::Sub(Subcategory {
            id: row.id,
            name: row.name,
            root_id: parent_id,
            lifecycle,
        }),
    }
}

fn category_to_new_row(category: &Category) -> NewCategoryRow<'_> {
    NewCategoryRow {
        id: category.id(),
        name: category.name(),
        parent_id: category.root_id(),
        lifecycle: category.lifecycle().as_str(),
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .filter(categories::id.eq(id))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        Ok(row.map(row_to_category))
    }

    async fn find_active_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .filter(categories::name.eq(name))
            .filter(categories::lifecycle.eq(Lifecycle::Active.as_str()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_read_error(&err))?;

        Ok(row.map(row_to_category))
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(categories::table)
            .values(category_to_new_row(category))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err, category.name()))
    }

    async fn archive(&self, id: Uuid) -> Result<bool, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(categories::table.filter(categories::id.eq(id)))
            .set(categories::lifecycle.eq(Lifecycle::Archived.as_str()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        Ok(updated > 0)
    }

    async fn list_active(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::lifecycle.eq(Lifecycle::Active.as_str()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_read_error(&err))?;

        Ok(rows.into_iter().map(row_to_category).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn row(parent_id: Option<Uuid>, lifecycle: &str) -> CategoryRow {
        CategoryRow {
            id: Uuid::new_v4(),
            name: "Programming".to_owned(),
            parent_id,
            lifecycle: lifecycle.to_owned(),
        }
    }

    #[rstest]
    fn rows_without_parent_become_roots() {
        let category = row_to_category(row(None, "active"));
        assert!(category.is_root());
        assert!(category.lifecycle().is_active());
    }

    #[rstest]
    fn rows_with_parent_become_subcategories() {
        let parent_id = Uuid::new_v4();
        let category = row_to_category(row(Some(parent_id), "archived"));
        assert_eq!(category.root_id(), Some(parent_id));
        assert!(!category.lifecycle().is_active());
    }

    #[rstest]
    fn unknown_lifecycle_labels_default_to_active() {
        let category = row_to_category(row(None, "retired"));
        assert!(category.lifecycle().is_active());
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_name() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert_eq!(
            map_diesel_error(&err, "Programming"),
            CategoryRepositoryError::duplicate_name("Programming")
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, CategoryRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn new_rows_mirror_the_domain_entity() {
        let category = Category::new_sub("Python", Uuid::new_v4()).expect("valid");
        let new_row = category_to_new_row(&category);
        assert_eq!(new_row.id, category.id());
        assert_eq!(new_row.parent_id, category.root_id());
        assert_eq!(new_row.lifecycle, "active");
    }
}
