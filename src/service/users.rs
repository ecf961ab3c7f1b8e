use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    crypto::password::CredentialHasher,
    error::ApiError,
    repo::{
        departments::DepartmentsRepo,
        event_levels::EventLevelsRepo,
        roles::RolesRepo,
        users::{NewUser, ProfilePatch, UserView, UsersRepo},
    },
};

pub struct RegisterUser {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    pub user_phone: String,
    pub department_id: String,
    /// True for accounts arriving through a social identity provider.
    pub is_socialed: bool,
}

pub struct UpdateUser {
    pub user_name: String,
    pub user_phone: String,
    pub department_id: String,
    pub event_level_name: String,
}

#[derive(Clone, Copy)]
pub struct Paging {
    pub offset: u64,
    pub limit: u64,
}

/// Account lifecycle orchestration. Every operation that resolves an account
/// by email sees active accounts only; withdrawn accounts behave as if they
/// never existed.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, input: RegisterUser) -> Result<(), ApiError>;
    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError>;
    async fn get_user(&self, email: &str) -> Result<UserView, ApiError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError>;
    async fn list_users(&self, paging: Paging) -> Result<Vec<UserView>, ApiError>;
    async fn list_users_by_department(
        &self,
        department_id: &str,
        paging: Paging,
    ) -> Result<Vec<UserView>, ApiError>;
    async fn update_user(&self, email: &str, input: UpdateUser) -> Result<(), ApiError>;
    async fn change_password(&self, email: &str, current: &str, new: &str)
        -> Result<(), ApiError>;
    async fn change_role(&self, email: &str, role_id: &str) -> Result<(), ApiError>;
    async fn withdraw(&self, email: &str) -> Result<(), ApiError>;
}

pub struct UserServiceImpl {
    users_repo: Arc<dyn UsersRepo>,
    roles_repo: Arc<dyn RolesRepo>,
    departments_repo: Arc<dyn DepartmentsRepo>,
    event_levels_repo: Arc<dyn EventLevelsRepo>,
    hasher: Arc<dyn CredentialHasher>,
    default_role_id: String,
    default_event_level: String,
}

impl UserServiceImpl {
    pub fn new(
        users_repo: Arc<dyn UsersRepo>,
        roles_repo: Arc<dyn RolesRepo>,
        departments_repo: Arc<dyn DepartmentsRepo>,
        event_levels_repo: Arc<dyn EventLevelsRepo>,
        hasher: Arc<dyn CredentialHasher>,
        default_role_id: String,
        default_event_level: String,
    ) -> Self {
        Self {
            users_repo,
            roles_repo,
            departments_repo,
            event_levels_repo,
            hasher,
            default_role_id,
            default_event_level,
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
impl UserService for UserServiceImpl {
    async fn register(&self, input: RegisterUser) -> Result<(), ApiError> {
        tracing::debug!(email = %input.user_email, "registering account");

        if self
            .users_repo
            .exists_active_by_email(&input.user_email)
            .await?
        {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }

        if !self.departments_repo.exists(&input.department_id).await? {
            return Err(ApiError::NotFound("department does not exist".to_string()));
        }

        // Registration defaults come from configuration; a misconfigured
        // default surfaces here rather than as a broken account later.
        if !self.roles_repo.exists(&self.default_role_id).await? {
            return Err(ApiError::NotFound(
                "default role is not configured".to_string(),
            ));
        }
        if !self
            .event_levels_repo
            .exists(&self.default_event_level)
            .await?
        {
            return Err(ApiError::NotFound(
                "default event level is not configured".to_string(),
            ));
        }

        let password_hash = self
            .hasher
            .hash(&input.user_password)
            .map_err(|_| ApiError::Storage(sea_orm::DbErr::Custom("hashing failed".to_string())))?;

        self.users_repo
            .insert(NewUser {
                user_name: input.user_name,
                user_email: input.user_email,
                password_hash,
                user_phone: input.user_phone,
                is_socialed: input.is_socialed,
                role_id: self.default_role_id.clone(),
                department_id: input.department_id,
                event_level_name: self.default_event_level.clone(),
            })
            .await?;

        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        tracing::debug!(email = %email, "verifying credentials");

        let user = self.load_active(email).await?;
        if !self.hasher.verify(password, &user.user_password) {
            return Err(ApiError::Unauthorized("password mismatch".to_string()));
        }
        Ok(())
    }

    async fn get_user(&self, email: &str) -> Result<UserView, ApiError> {
        self.users_repo
            .find_view_by_email(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("no active account for that email".to_string()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ApiError> {
        Ok(self.users_repo.exists_active_by_email(email).await?)
    }

    async fn list_users(&self, paging: Paging) -> Result<Vec<UserView>, ApiError> {
        Ok(self
            .users_repo
            .list_views(paging.offset, paging.limit)
            .await?)
    }

    async fn list_users_by_department(
        &self,
        department_id: &str,
        paging: Paging,
    ) -> Result<Vec<UserView>, ApiError> {
        Ok(self
            .users_repo
            .list_views_by_department(department_id, paging.offset, paging.limit)
            .await?)
    }

    async fn update_user(&self, email: &str, input: UpdateUser) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;

        if !self.departments_repo.exists(&input.department_id).await? {
            return Err(ApiError::NotFound("department does not exist".to_string()));
        }
        if !self
            .event_levels_repo
            .exists(&input.event_level_name)
            .await?
        {
            return Err(ApiError::NotFound("event level does not exist".to_string()));
        }

        self.users_repo
            .update_profile(
                user.user_no,
                ProfilePatch {
                    user_name: input.user_name,
                    user_phone: input.user_phone,
                    department_id: input.department_id,
                    event_level_name: input.event_level_name,
                },
            )
            .await?;
        Ok(())
    }

    async fn change_password(
        &self,
        email: &str,
        current: &str,
        new: &str,
    ) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;
        if !self.hasher.verify(current, &user.user_password) {
            return Err(ApiError::Unauthorized("password mismatch".to_string()));
        }

        let password_hash = self
            .hasher
            .hash(new)
            .map_err(|_| ApiError::Storage(sea_orm::DbErr::Custom("hashing failed".to_string())))?;
        self.users_repo
            .update_password(user.user_no, &password_hash)
            .await?;
        Ok(())
    }

    async fn change_role(&self, email: &str, role_id: &str) -> Result<(), ApiError> {
        let user = self.load_active(email).await?;
        if !self.roles_repo.exists(role_id).await? {
            return Err(ApiError::NotFound("role does not exist".to_string()));
        }
        self.users_repo.update_role(user.user_no, role_id).await?;
        Ok(())
    }

    async fn withdraw(&self, email: &str) -> Result<(), ApiError> {
        tracing::debug!(email = %email, "withdrawing account");

        // Withdrawal is soft and one-way; a second call no longer finds an
        // active account and fails NotFound.
        let user = self.load_active(email).await?;
        self.users_repo.mark_withdrawn(user.user_no).await?;
        Ok(())
    }
}
