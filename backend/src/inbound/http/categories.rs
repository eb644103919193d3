//! Category HTTP handlers.
//!
//! ```text
//! GET  /api/v1/categories
//! POST /api/v1/categories
//! GET  /api/v1/categories/{id}/children
//! POST /api/v1/categories/{id}/archive
//! ```
//!
//! Listings are public; mutations require a staff session.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::catalog::Category;
use crate::domain::ports::{CategoryChild, CategoryTreeNode, CreateCategoryRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_field;

/// Request payload for creating a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// Display name, unique across all categories.
    pub name: Option<String>,
    /// Parent root category; omit to create a root category.
    pub parent_id: Option<Uuid>,
}

/// Response payload for a single category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Identifier of the category.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Identifier of the parent root, when this is a subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Lifecycle label.
    pub lifecycle: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            parent_id: value.root_id().map(|id| id.to_string()),
            lifecycle: value.lifecycle().to_string(),
        }
    }
}

/// Response payload for a tree node.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNodeResponse {
    /// Identifier of the root category.
    pub id: String,
    /// Display name of the root category.
    pub name: String,
    /// Whether the root has no active children.
    pub is_leaf: bool,
    /// Active children sorted by name.
    pub children: Vec<CategoryChildResponse>,
}

/// Response payload for a subcategory entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChildResponse {
    /// Identifier of the subcategory.
    pub id: String,
    /// Display name of the subcategory.
    pub name: String,
}

impl From<CategoryChild> for CategoryChildResponse {
    fn from(value: CategoryChild) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
        }
    }
}

impl From<CategoryTreeNode> for CategoryTreeNodeResponse {
    fn from(value: CategoryTreeNode) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            is_leaf: value.is_leaf,
            children: value.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// List active categories as a name-sorted two-level tree.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category tree", body = [CategoryTreeNodeResponse]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryTreeNodeResponse>>> {
    let tree = state.categories_query.tree().await?;
    Ok(web::Json(tree.into_iter().map(Into::into).collect()))
}

/// List the direct active children of a root category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/children",
    params(("id" = Uuid, Path, description = "Root category identifier")),
    responses(
        (status = 200, description = "Children sorted by name", body = [CategoryChildResponse]),
        (status = 404, description = "Not a root category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategoryChildren"
)]
#[get("/categories/{id}/children")]
pub async fn list_category_children(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<CategoryChildResponse>>> {
    let children = state.categories_query.children(path.into_inner()).await?;
    Ok(web::Json(children.into_iter().map(Into::into).collect()))
}

/// Create a category (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Parent not found", body = Error),
        (status = 409, description = "Duplicate name", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let payload = payload.into_inner();
    let name = require_field(payload.name, "name")?;

    let category = state
        .categories
        .create(CreateCategoryRequest {
            name,
            parent_id: payload.parent_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// Archive a category (staff only).
#[utoipa::path(
    post,
    path = "/api/v1/categories/{id}/archive",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category archived"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Staff access required", body = Error),
        (status = 404, description = "Category not found", body = Error)
    ),
    tags = ["categories"],
    operation_id = "archiveCategory"
)]
#[post("/categories/{id}/archive")]
pub async fn archive_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    state.categories.archive(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
