use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    entities::event_levels,
    error::ApiError,
    repo::{event_levels::EventLevelsRepo, users::UsersRepo},
};

#[async_trait]
pub trait EventLevelService: Send + Sync {
    async fn create(&self, name: &str, details: &str, priority: i32) -> Result<(), ApiError>;
    async fn get(&self, name: &str) -> Result<event_levels::Model, ApiError>;
    async fn exists(&self, name: &str) -> Result<bool, ApiError>;
    async fn list(&self) -> Result<Vec<event_levels::Model>, ApiError>;
    async fn update(&self, name: &str, details: &str, priority: i32) -> Result<(), ApiError>;
    async fn delete(&self, name: &str) -> Result<(), ApiError>;
}

pub struct EventLevelServiceImpl {
    event_levels_repo: Arc<dyn EventLevelsRepo>,
    users_repo: Arc<dyn UsersRepo>,
}

impl EventLevelServiceImpl {
    pub fn new(event_levels_repo: Arc<dyn EventLevelsRepo>, users_repo: Arc<dyn UsersRepo>) -> Self {
        Self {
            event_levels_repo,
            users_repo,
        }
    }
}

#[async_trait]
impl EventLevelService for EventLevelServiceImpl {
    async fn create(&self, name: &str, details: &str, priority: i32) -> Result<(), ApiError> {
        if self.event_levels_repo.exists(name).await? {
            return Err(ApiError::Conflict("event level already exists".to_string()));
        }
        self.event_levels_repo.insert(name, details, priority).await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<event_levels::Model, ApiError> {
        self.event_levels_repo
            .find(name)
            .await?
            .ok_or_else(|| ApiError::NotFound("event level does not exist".to_string()))
    }

    async fn exists(&self, name: &str) -> Result<bool, ApiError> {
        Ok(self.event_levels_repo.exists(name).await?)
    }

    async fn list(&self) -> Result<Vec<event_levels::Model>, ApiError> {
        Ok(self.event_levels_repo.list().await?)
    }

    async fn update(&self, name: &str, details: &str, priority: i32) -> Result<(), ApiError> {
        if !self.event_levels_repo.exists(name).await? {
            return Err(ApiError::NotFound("event level does not exist".to_string()));
        }
        self.event_levels_repo.update(name, details, priority).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ApiError> {
        if !self.event_levels_repo.exists(name).await? {
            return Err(ApiError::NotFound("event level does not exist".to_string()));
        }
        if self.users_repo.count_active_by_event_level(name).await? > 0 {
            return Err(ApiError::Conflict(
                "event level is referenced by active accounts".to_string(),
            ));
        }
        self.event_levels_repo.delete(name).await?;
        Ok(())
    }
}
