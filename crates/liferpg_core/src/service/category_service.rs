//! Category use-case service.

use crate::model::category::{Category, CategoryId};
use crate::model::ValidationError;
use crate::repo::{RecordKind, RepoError, Store};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for category use-cases.
#[derive(Debug)]
pub enum CategoryServiceError {
    CategoryNotFound(CategoryId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryNotFound(uuid) => write!(f, "category not found: {uuid}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CategoryNotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound {
                kind: RecordKind::Category,
                uuid,
            } => Self::CategoryNotFound(uuid),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
    /// Icon name consumed by the UI layer.
    pub icon: String,
    /// `#RRGGBB` hex color.
    pub color: String,
    pub base_xp: i64,
}

/// Use-case facade for categories.
pub struct CategoryService<S: Store> {
    store: S,
}

impl<S: Store> CategoryService<S> {
    /// Creates a service using the provided record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists all categories ordered by name.
    pub fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.store.list_categories()?)
    }

    /// Gets one category by ID.
    pub fn get_category(&self, uuid: CategoryId) -> Result<Category, CategoryServiceError> {
        self.store
            .get_category(uuid)?
            .ok_or(CategoryServiceError::CategoryNotFound(uuid))
    }

    /// Creates a category from the request fields.
    pub fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::new(
            request.name.clone(),
            request.description.clone(),
            request.icon.clone(),
            request.color.clone(),
            request.base_xp,
        );
        self.store.create_category(&category)?;
        Ok(category)
    }
}
