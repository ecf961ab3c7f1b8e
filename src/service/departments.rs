use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    entities::departments,
    error::ApiError,
    repo::{departments::DepartmentsRepo, users::UsersRepo},
};

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn create(&self, id: &str, name: &str) -> Result<(), ApiError>;
    async fn get(&self, id: &str) -> Result<departments::Model, ApiError>;
    async fn exists(&self, id: &str) -> Result<bool, ApiError>;
    async fn list(&self) -> Result<Vec<departments::Model>, ApiError>;
    async fn update(&self, id: &str, name: &str) -> Result<(), ApiError>;
    async fn update_dashboard(
        &self,
        id: &str,
        dashboard_uid: &str,
        dashboard_title: &str,
    ) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

pub struct DepartmentServiceImpl {
    departments_repo: Arc<dyn DepartmentsRepo>,
    users_repo: Arc<dyn UsersRepo>,
}

impl DepartmentServiceImpl {
    pub fn new(departments_repo: Arc<dyn DepartmentsRepo>, users_repo: Arc<dyn UsersRepo>) -> Self {
        Self {
            departments_repo,
            users_repo,
        }
    }
}

#[async_trait]
impl DepartmentService for DepartmentServiceImpl {
    async fn create(&self, id: &str, name: &str) -> Result<(), ApiError> {
        if self.departments_repo.exists(id).await? {
            return Err(ApiError::Conflict("department already exists".to_string()));
        }
        self.departments_repo.insert(id, name).await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<departments::Model, ApiError> {
        self.departments_repo
            .find(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("department does not exist".to_string()))
    }

    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        Ok(self.departments_repo.exists(id).await?)
    }

    async fn list(&self) -> Result<Vec<departments::Model>, ApiError> {
        Ok(self.departments_repo.list().await?)
    }

    async fn update(&self, id: &str, name: &str) -> Result<(), ApiError> {
        if !self.departments_repo.exists(id).await? {
            return Err(ApiError::NotFound("department does not exist".to_string()));
        }
        self.departments_repo.update_name(id, name).await?;
        Ok(())
    }

    async fn update_dashboard(
        &self,
        id: &str,
        dashboard_uid: &str,
        dashboard_title: &str,
    ) -> Result<(), ApiError> {
        if !self.departments_repo.exists(id).await? {
            return Err(ApiError::NotFound("department does not exist".to_string()));
        }
        self.departments_repo
            .update_dashboard(id, dashboard_uid, dashboard_title)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if !self.departments_repo.exists(id).await? {
            return Err(ApiError::NotFound("department does not exist".to_string()));
        }
        // Active accounts still classified under this department keep it
        // alive; deleting it would leave them pointing at nothing.
        if self.users_repo.count_active_by_department(id).await? > 0 {
            return Err(ApiError::Conflict(
                "department is referenced by active accounts".to_string(),
            ));
        }
        self.departments_repo.delete(id).await?;
        Ok(())
    }
}
