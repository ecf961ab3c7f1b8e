use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entities::{departments, event_levels, users},
    state::DatabaseClient,
};

/// Fields a caller supplies at registration; the store assigns `user_no` and
/// both timestamps.
pub struct NewUser {
    pub user_name: String,
    pub user_email: String,
    pub password_hash: String,
    pub user_phone: String,
    pub is_socialed: bool,
    pub role_id: String,
    pub department_id: String,
    pub event_level_name: String,
}

pub struct ProfilePatch {
    pub user_name: String,
    pub user_phone: String,
    pub department_id: String,
    pub event_level_name: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DepartmentView {
    pub department_id: String,
    pub department_name: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct EventLevelView {
    pub event_level_name: String,
    pub event_level_details: String,
    pub priority: i32,
}

/// Read projection of an active user joined with its resolved department and
/// event level records. Never contains the password digest.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserView {
    pub user_no: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub role_id: String,
    pub department: DepartmentView,
    pub event_level: EventLevelView,
}

/// Account store. Every lookup filters to active rows; a withdrawn email does
/// not satisfy `exists_active_by_email` and is free for re-registration.
#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn exists_active_by_email(&self, email: &str) -> Result<bool, sea_orm::DbErr>;
    async fn find_active_by_email(&self, email: &str)
        -> Result<Option<users::Model>, sea_orm::DbErr>;
    async fn find_view_by_email(&self, email: &str) -> Result<Option<UserView>, sea_orm::DbErr>;
    async fn insert(&self, new_user: NewUser) -> Result<users::Model, sea_orm::DbErr>;
    async fn update_profile(&self, user_no: i64, patch: ProfilePatch)
        -> Result<(), sea_orm::DbErr>;
    async fn update_password(&self, user_no: i64, password_hash: &str)
        -> Result<(), sea_orm::DbErr>;
    async fn update_role(&self, user_no: i64, role_id: &str) -> Result<(), sea_orm::DbErr>;
    async fn mark_withdrawn(&self, user_no: i64) -> Result<(), sea_orm::DbErr>;
    async fn list_views(&self, offset: u64, limit: u64) -> Result<Vec<UserView>, sea_orm::DbErr>;
    async fn list_views_by_department(
        &self,
        department_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<UserView>, sea_orm::DbErr>;
    async fn count_active_by_role(&self, role_id: &str) -> Result<u64, sea_orm::DbErr>;
    async fn count_active_by_department(&self, department_id: &str)
        -> Result<u64, sea_orm::DbErr>;
    async fn count_active_by_event_level(
        &self,
        event_level_name: &str,
    ) -> Result<u64, sea_orm::DbErr>;
}

pub struct SeaOrmUsersRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmUsersRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    fn active() -> sea_orm::Select<users::Entity> {
        users::Entity::find().filter(users::Column::WithdrawalAt.is_null())
    }

    async fn compose_view<C: ConnectionTrait>(
        conn: &C,
        user: users::Model,
    ) -> Result<UserView, sea_orm::DbErr> {
        let department = departments::Entity::find_by_id(user.department_id.clone())
            .one(conn)
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound(format!(
                    "department {} referenced by user {}",
                    user.department_id, user.user_no
                ))
            })?;

        let event_level = event_levels::Entity::find_by_id(user.event_level_name.clone())
            .one(conn)
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound(format!(
                    "event level {} referenced by user {}",
                    user.event_level_name, user.user_no
                ))
            })?;

        Ok(UserView {
            user_no: user.user_no,
            user_name: user.user_name,
            user_email: user.user_email,
            user_phone: user.user_phone,
            role_id: user.role_id,
            department: DepartmentView {
                department_id: department.department_id,
                department_name: department.department_name,
            },
            event_level: EventLevelView {
                event_level_name: event_level.event_level_name,
                event_level_details: event_level.event_level_details,
                priority: event_level.priority,
            },
        })
    }

    async fn compose_views(
        &self,
        rows: Vec<users::Model>,
    ) -> Result<Vec<UserView>, sea_orm::DbErr> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(Self::compose_view(self.db.conn(), row).await?);
        }
        Ok(views)
    }
}

#[async_trait]
impl UsersRepo for SeaOrmUsersRepo {
    async fn exists_active_by_email(&self, email: &str) -> Result<bool, sea_orm::DbErr> {
        let found = Self::active()
            .filter(users::Column::UserEmail.eq(email))
            .one(self.db.conn())
            .await?;
        Ok(found.is_some())
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<users::Model>, sea_orm::DbErr> {
        Self::active()
            .filter(users::Column::UserEmail.eq(email))
            .one(self.db.conn())
            .await
    }

    async fn find_view_by_email(&self, email: &str) -> Result<Option<UserView>, sea_orm::DbErr> {
        let Some(user) = self.find_active_by_email(email).await? else {
            return Ok(None);
        };
        Ok(Some(Self::compose_view(self.db.conn(), user).await?))
    }

    async fn insert(&self, new_user: NewUser) -> Result<users::Model, sea_orm::DbErr> {
        let now = Utc::now();
        let model = users::ActiveModel {
            user_name: Set(new_user.user_name),
            user_email: Set(new_user.user_email),
            user_password: Set(new_user.password_hash),
            user_phone: Set(new_user.user_phone),
            is_socialed: Set(new_user.is_socialed),
            role_id: Set(new_user.role_id),
            department_id: Set(new_user.department_id),
            event_level_name: Set(new_user.event_level_name),
            image_no: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            withdrawal_at: Set(None),
            ..Default::default()
        };
        model.insert(self.db.conn()).await
    }

    async fn update_profile(
        &self,
        user_no: i64,
        patch: ProfilePatch,
    ) -> Result<(), sea_orm::DbErr> {
        users::Entity::update_many()
            .col_expr(users::Column::UserName, Expr::value(patch.user_name))
            .col_expr(users::Column::UserPhone, Expr::value(patch.user_phone))
            .col_expr(users::Column::DepartmentId, Expr::value(patch.department_id))
            .col_expr(
                users::Column::EventLevelName,
                Expr::value(patch.event_level_name),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::UserNo.eq(user_no))
            .filter(users::Column::WithdrawalAt.is_null())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn update_password(
        &self,
        user_no: i64,
        password_hash: &str,
    ) -> Result<(), sea_orm::DbErr> {
        users::Entity::update_many()
            .col_expr(users::Column::UserPassword, Expr::value(password_hash))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::UserNo.eq(user_no))
            .filter(users::Column::WithdrawalAt.is_null())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn update_role(&self, user_no: i64, role_id: &str) -> Result<(), sea_orm::DbErr> {
        users::Entity::update_many()
            .col_expr(users::Column::RoleId, Expr::value(role_id))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::UserNo.eq(user_no))
            .filter(users::Column::WithdrawalAt.is_null())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn mark_withdrawn(&self, user_no: i64) -> Result<(), sea_orm::DbErr> {
        let now = Utc::now();
        users::Entity::update_many()
            .col_expr(users::Column::WithdrawalAt, Expr::value(now))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::UserNo.eq(user_no))
            .filter(users::Column::WithdrawalAt.is_null())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn list_views(&self, offset: u64, limit: u64) -> Result<Vec<UserView>, sea_orm::DbErr> {
        let rows = Self::active()
            .order_by_asc(users::Column::UserNo)
            .offset(offset)
            .limit(limit)
            .all(self.db.conn())
            .await?;
        self.compose_views(rows).await
    }

    async fn list_views_by_department(
        &self,
        department_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<UserView>, sea_orm::DbErr> {
        let rows = Self::active()
            .filter(users::Column::DepartmentId.eq(department_id))
            .order_by_asc(users::Column::UserNo)
            .offset(offset)
            .limit(limit)
            .all(self.db.conn())
            .await?;
        self.compose_views(rows).await
    }

    async fn count_active_by_role(&self, role_id: &str) -> Result<u64, sea_orm::DbErr> {
        Self::active()
            .filter(users::Column::RoleId.eq(role_id))
            .count(self.db.conn())
            .await
    }

    async fn count_active_by_department(
        &self,
        department_id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        Self::active()
            .filter(users::Column::DepartmentId.eq(department_id))
            .count(self.db.conn())
            .await
    }

    async fn count_active_by_event_level(
        &self,
        event_level_name: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        Self::active()
            .filter(users::Column::EventLevelName.eq(event_level_name))
            .count(self.db.conn())
            .await
    }
}
