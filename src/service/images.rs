use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::ApiError,
    repo::{images::ImagesRepo, users::UsersRepo},
};

/// Profile image lifecycle. An account owns at most one image; the image row
/// exists exactly as long as the account references it.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn get_image(&self, email: &str) -> Result<String, ApiError>;
    async fn create_image(&self, email: &str, image_path: &str) -> Result<(), ApiError>;
    async fn update_image(&self, email: &str, image_path: &str) -> Result<(), ApiError>;
    async fn delete_image(&self, email: &str) -> Result<(), ApiError>;
}

pub struct ImageServiceImpl {
    users_repo: Arc<dyn UsersRepo>,
    images_repo: Arc<dyn ImagesRepo>,
}

impl ImageServiceImpl {
    pub fn new(users_repo: Arc<dyn UsersRepo>, images_repo: Arc<dyn ImagesRepo>) -> Self {
        Self {
            users_repo,
            images_repo,
        }
    }

    async fn load_active(&self, email: &str) -> Result<crate::entities::users::Model, ApiError> {
        self.users_repo
            .find_active_by_email(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("no active account for that email".to_string()))
    }
}

#[async_trait]
impl ImageService for ImageServiceImpl {
    async fn get_image(&self, email: &str) -> Result<String, ApiError> {
        let user = self.load_active(email).await?;
        let Some(image_no) = user.image_no else {
            return Err(ApiError::NotFound("no profile image set".to_string()));
        };

        let image = self
            .images_repo
            .find_by_image_no(image_no)
            .await?
            .ok_or_else(|| {
                ApiError::Storage(sea_orm::DbErr::RecordNotFound(format!(
                    "image {} referenced by user {}",
                    image_no, user.user_no
                )))
            })?;
        Ok(image.image_path)
    }

    async fn create_image(&self, email: &str, image_path: &str) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;
        if user.image_no.is_some() {
            return Err(ApiError::Conflict("profile image already set".to_string()));
        }

        self.images_repo.attach(user.user_no, image_path).await?;
        Ok(())
    }

    async fn update_image(&self, email: &str, image_path: &str) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;
        // An update rewrites an existing image path; it never creates one.
        let Some(image_no) = user.image_no else {
            return Err(ApiError::NotFound("no profile image set".to_string()));
        };

        self.images_repo.update_path(image_no, image_path).await?;
        Ok(())
    }

    async fn delete_image(&self, email: &str) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;
        let Some(image_no) = user.image_no else {
            return Err(ApiError::NotFound("no profile image set".to_string()));
        };

        self.images_repo.detach(user.user_no, image_no).await?;
        Ok(())
    }
}
