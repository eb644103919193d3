//! Category hierarchy service.
//!
//! Implements the category driving ports on top of a [`CategoryRepository`].
//! The hierarchy is strictly two levels deep: the service rejects any parent
//! that is itself a subcategory, and the two-tier entity shapes make deeper
//! nesting unrepresentable from there on.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::catalog::{Category, validate_text};
use crate::domain::ports::{
    CategoryChild, CategoryCommand, CategoryQuery, CategoryRepository, CategoryRepositoryError,
    CategoryTreeNode, CreateCategoryRequest,
};
use crate::domain::{Error, Lifecycle};

/// Category service implementing the driving ports.
#[derive(Clone)]
pub struct CategoryService<R> {
    repo: Arc<R>,
}

impl<R> CategoryService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repo_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::DuplicateName { name } => duplicate_name_error(&name),
    }
}

fn duplicate_name_error(name: &str) -> Error {
    Error::duplicate_name("this category already exists").with_details(json!({
        "field": "name",
        "value": name,
    }))
}

fn excessive_depth_error() -> Error {
    Error::excessive_depth("a category can only have one level of subcategories")
        .with_details(json!({ "field": "parentId" }))
}

/// Assemble active categories into name-sorted tree nodes.
///
/// Subcategories whose root is absent from `categories` (an archived root)
/// are dropped from the listing; archiving never cascades in the store.
fn assemble_tree(categories: Vec<Category>) -> Vec<CategoryTreeNode> {
    let mut roots = Vec::new();
    let mut subs = Vec::new();
    for category in categories {
        match category {
            Category::Root(root) => roots.push(root),
            Category::Sub(sub) => subs.push(sub),
        }
    }

    roots.sort_by(|a, b| a.name.cmp(&b.name));
    subs.sort_by(|a, b| a.name.cmp(&b.name));

    roots
        .into_iter()
        .map(|root| {
            let children: Vec<CategoryChild> = subs
                .iter()
                .filter(|sub| sub.root_id == root.id)
                .map(|sub| CategoryChild {
                    id: sub.id,
                    name: sub.name.clone(),
                })
                .collect();
            CategoryTreeNode {
                id: root.id,
                name: root.name,
                is_leaf: children.is_empty(),
                children,
            }
        })
        .collect()
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    async fn resolve_parent(&self, parent_id: Uuid) -> Result<Uuid, Error> {
        let parent = self
            .repo
            .find_by_id(parent_id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("parent category not found"))?;

        match parent {
            Category::Sub(_) => Err(excessive_depth_error()),
            Category::Root(root) if root.lifecycle == Lifecycle::Archived => {
                Err(Error::not_found("parent category is archived"))
            }
            Category::Root(root) => Ok(root.id),
        }
    }
}

#[async_trait]
impl<R> CategoryCommand for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category, Error> {
        let name = validate_text(request.name, "name").map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
        })?;

        let category = match request.parent_id {
            None => Category::new_root(name.clone()),
            Some(parent_id) => {
                let root_id = self.resolve_parent(parent_id).await?;
                Category::new_sub(name.clone(), root_id)
            }
        }
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        // Friendly pre-check; the unique constraint decides under races.
        if self
            .repo
            .find_active_by_name(&name)
            .await
            .map_err(map_repo_error)?
            .is_some()
        {
            return Err(duplicate_name_error(&name));
        }

        self.repo.insert(&category).await.map_err(map_repo_error)?;
        Ok(category)
    }

    async fn archive(&self, id: Uuid) -> Result<(), Error> {
        let archived = self.repo.archive(id).await.map_err(map_repo_error)?;
        if archived {
            Ok(())
        } else {
            Err(Error::not_found("category not found"))
        }
    }
}

#[async_trait]
impl<R> CategoryQuery for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn tree(&self) -> Result<Vec<CategoryTreeNode>, Error> {
        let categories = self.repo.list_active().await.map_err(map_repo_error)?;
        Ok(assemble_tree(categories))
    }

    async fn children(&self, root_id: Uuid) -> Result<Vec<CategoryChild>, Error> {
        let root = self
            .repo
            .find_by_id(root_id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("category not found"))?;
        if !root.is_root() {
            return Err(Error::not_found("category is not a root category"));
        }

        let categories = self.repo.list_active().await.map_err(map_repo_error)?;
        let mut children: Vec<CategoryChild> = categories
            .into_iter()
            .filter_map(|category| match category {
                Category::Sub(sub) if sub.root_id == root_id => Some(CategoryChild {
                    id: sub.id,
                    name: sub.name,
                }),
                _ => None,
            })
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalog::category::{RootCategory, Subcategory};
    use crate::domain::ports::MockCategoryRepository;

    fn service(repo: MockCategoryRepository) -> CategoryService<MockCategoryRepository> {
        CategoryService::new(Arc::new(repo))
    }

    fn root(name: &str) -> Category {
        Category::Root(RootCategory {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            lifecycle: Lifecycle::Active,
        })
    }

    fn sub(name: &str, root_id: Uuid) -> Category {
        Category::Sub(Subcategory {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            root_id,
            lifecycle: Lifecycle::Active,
        })
    }

    #[tokio::test]
    async fn creates_a_root_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let created = service(repo)
            .create(CreateCategoryRequest {
                name: "Programming".into(),
                parent_id: None,
            })
            .await
            .expect("create succeeds");

        assert!(created.is_root());
        assert_eq!(created.name(), "Programming");
    }

    #[tokio::test]
    async fn creates_a_subcategory_under_a_root() {
        let parent = root("Programming");
        let parent_id = parent.id();
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(parent)));
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let created = service(repo)
            .create(CreateCategoryRequest {
                name: "Python".into(),
                parent_id: Some(parent_id),
            })
            .await
            .expect("create succeeds");

        assert_eq!(created.root_id(), Some(parent_id));
    }

    #[tokio::test]
    async fn rejects_a_third_hierarchy_level() {
        let parent = sub("Python", Uuid::new_v4());
        let parent_id = parent.id();
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(parent)));
        repo.expect_find_active_by_name().times(0);
        repo.expect_insert().times(0);

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "Advanced Python".into(),
                parent_id: Some(parent_id),
            })
            .await
            .expect_err("third level rejected");

        assert_eq!(err.code, ErrorCode::ExcessiveDepth);
    }

    #[tokio::test]
    async fn rejects_duplicate_names_on_pre_check() {
        let existing = root("Programming");
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_insert().times(0);

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "Programming".into(),
                parent_id: None,
            })
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err.code, ErrorCode::DuplicateName);
    }

    #[tokio::test]
    async fn maps_lost_uniqueness_race_to_duplicate_name() {
        // The pre-check passes but the insert hits the unique constraint.
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_active_by_name()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| {
            Err(CategoryRepositoryError::duplicate_name("Programming"))
        });

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "Programming".into(),
                parent_id: None,
            })
            .await
            .expect_err("race loser rejected");

        assert_eq!(err.code, ErrorCode::DuplicateName);
    }

    #[tokio::test]
    async fn rejects_missing_parent() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        repo.expect_insert().times(0);

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "Python".into(),
                parent_id: Some(Uuid::new_v4()),
            })
            .await
            .expect_err("missing parent rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn rejects_archived_parent() {
        let parent = Category::Root(RootCategory {
            id: Uuid::new_v4(),
            name: "Retired".into(),
            lifecycle: Lifecycle::Archived,
        });
        let parent_id = parent.id();
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(parent)));
        repo.expect_insert().times(0);

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "Python".into(),
                parent_id: Some(parent_id),
            })
            .await
            .expect_err("archived parent rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn rejects_blank_names_without_touching_the_store() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_active_by_name().times(0);
        repo.expect_insert().times(0);

        let err = service(repo)
            .create(CreateCategoryRequest {
                name: "   ".into(),
                parent_id: None,
            })
            .await
            .expect_err("blank name rejected");

        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn archive_of_unknown_category_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_archive().times(1).return_once(|_| Ok(false));

        let err = service(repo)
            .archive(Uuid::new_v4())
            .await
            .expect_err("unknown id rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn tree_is_name_sorted_at_both_levels() {
        let science = root("Science");
        let programming = root("Programming");
        let programming_id = programming.id();
        let python = sub("Python", programming_id);
        let c_lang = sub("C", programming_id);
        let categories = vec![science.clone(), python, programming.clone(), c_lang];

        let mut repo = MockCategoryRepository::new();
        repo.expect_list_active()
            .times(1)
            .return_once(move || Ok(categories));

        let tree = service(repo).tree().await.expect("tree listing");

        let names: Vec<&str> = tree.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["Programming", "Science"]);

        let programming_node = tree.first().expect("programming node");
        let child_names: Vec<&str> = programming_node
            .children
            .iter()
            .map(|child| child.name.as_str())
            .collect();
        assert_eq!(child_names, vec!["C", "Python"]);
        assert!(!programming_node.is_leaf);

        let science_node = tree.get(1).expect("science node");
        assert!(science_node.is_leaf);
    }

    #[tokio::test]
    async fn children_requires_a_root_category() {
        let target = sub("Python", Uuid::new_v4());
        let target_id = target.id();
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(target)));

        let err = service(repo)
            .children(target_id)
            .await
            .expect_err("subcategory rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn repository_outage_maps_to_service_unavailable() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list_active().times(1).return_once(|| {
            Err(CategoryRepositoryError::connection("connection refused"))
        });

        let err = service(repo).tree().await.expect_err("outage surfaces");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }
}
