use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{entities::roles, state::DatabaseClient};

#[async_trait]
pub trait RolesRepo: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr>;
    async fn find(&self, id: &str) -> Result<Option<roles::Model>, sea_orm::DbErr>;
    async fn list(&self) -> Result<Vec<roles::Model>, sea_orm::DbErr>;
    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr>;
    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr>;
    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr>;
}

pub struct SeaOrmRolesRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmRolesRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RolesRepo for SeaOrmRolesRepo {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr> {
        let found = roles::Entity::find_by_id(id.to_string())
            .one(self.db.conn())
            .await?;
        Ok(found.is_some())
    }

    async fn find(&self, id: &str) -> Result<Option<roles::Model>, sea_orm::DbErr> {
        roles::Entity::find_by_id(id.to_string())
            .one(self.db.conn())
            .await
    }

    async fn list(&self) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
        roles::Entity::find()
            .order_by_asc(roles::Column::RoleId)
            .all(self.db.conn())
            .await
    }

    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        roles::ActiveModel {
            role_id: Set(id.to_string()),
            role_name: Set(name.to_string()),
        }
        .insert(self.db.conn())
        .await?;
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        roles::Entity::update_many()
            .col_expr(roles::Column::RoleName, Expr::value(name))
            .filter(roles::Column::RoleId.eq(id))
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr> {
        roles::Entity::delete_by_id(id.to_string())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }
}
