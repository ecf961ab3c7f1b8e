use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    entities::roles,
    error::ApiError,
    repo::{roles::RolesRepo, users::UsersRepo},
};

#[async_trait]
pub trait RoleService: Send + Sync {
    async fn create(&self, id: &str, name: &str) -> Result<(), ApiError>;
    async fn get(&self, id: &str) -> Result<roles::Model, ApiError>;
    async fn exists(&self, id: &str) -> Result<bool, ApiError>;
    async fn list(&self) -> Result<Vec<roles::Model>, ApiError>;
    async fn update(&self, id: &str, name: &str) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

pub struct RoleServiceImpl {
    roles_repo: Arc<dyn RolesRepo>,
    users_repo: Arc<dyn UsersRepo>,
}

impl RoleServiceImpl {
    pub fn new(roles_repo: Arc<dyn RolesRepo>, users_repo: Arc<dyn UsersRepo>) -> Self {
        Self {
            roles_repo,
            users_repo,
        }
    }
}

#[async_trait]
impl RoleService for RoleServiceImpl {
    async fn create(&self, id: &str, name: &str) -> Result<(), ApiError> {
        if self.roles_repo.exists(id).await? {
            return Err(ApiError::Conflict("role already exists".to_string()));
        }
        self.roles_repo.insert(id, name).await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<roles::Model, ApiError> {
        self.roles_repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("role does not exist".to_string()))
    }

    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        Ok(self.roles_repo.exists(id).await?)
    }

    async fn list(&self) -> Result<Vec<roles::Model>, ApiError> {
        Ok(self.roles_repo.list().await?)
    }

    async fn update(&self, id: &str, name: &str) -> Result<(), ApiError> {
        if !self.roles_repo.exists(id).await? {
            return Err(ApiError::NotFound("role does not exist".to_string()));
        }
        self.roles_repo.update_name(id, name).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if !self.roles_repo.exists(id).await? {
            return Err(ApiError::NotFound("role does not exist".to_string()));
        }
        if self.users_repo.count_active_by_role(id).await? > 0 {
            return Err(ApiError::Conflict(
                "role is referenced by active accounts".to_string(),
            ));
        }
        self.roles_repo.delete(id).await?;
        Ok(())
    }
}
