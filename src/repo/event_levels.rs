use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{entities::event_levels, state::DatabaseClient};

#[async_trait]
pub trait EventLevelsRepo: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool, sea_orm::DbErr>;
    async fn find(&self, name: &str) -> Result<Option<event_levels::Model>, sea_orm::DbErr>;
    async fn list(&self) -> Result<Vec<event_levels::Model>, sea_orm::DbErr>;
    async fn insert(&self, name: &str, details: &str, priority: i32)
        -> Result<(), sea_orm::DbErr>;
    async fn update(&self, name: &str, details: &str, priority: i32)
        -> Result<(), sea_orm::DbErr>;
    async fn delete(&self, name: &str) -> Result<(), sea_orm::DbErr>;
}

pub struct SeaOrmEventLevelsRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmEventLevelsRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventLevelsRepo for SeaOrmEventLevelsRepo {
    async fn exists(&self, name: &str) -> Result<bool, sea_orm::DbErr> {
        let found = event_levels::Entity::find_by_id(name.to_string())
            .one(self.db.conn())
            .await?;
        Ok(found.is_some())
    }

    async fn find(&self, name: &str) -> Result<Option<event_levels::Model>, sea_orm::DbErr> {
        event_levels::Entity::find_by_id(name.to_string())
            .one(self.db.conn())
            .await
    }

    async fn list(&self) -> Result<Vec<event_levels::Model>, sea_orm::DbErr> {
        event_levels::Entity::find()
            .order_by_asc(event_levels::Column::Priority)
            .all(self.db.conn())
            .await
    }

    async fn insert(
        &self,
        name: &str,
        details: &str,
        priority: i32,
    ) -> Result<(), sea_orm::DbErr> {
        event_levels::ActiveModel {
            event_level_name: Set(name.to_string()),
            event_level_details: Set(details.to_string()),
            priority: Set(priority),
        }
        .insert(self.db.conn())
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        name: &str,
        details: &str,
        priority: i32,
    ) -> Result<(), sea_orm::DbErr> {
        event_levels::Entity::update_many()
            .col_expr(event_levels::Column::EventLevelDetails, Expr::value(details))
            .col_expr(event_levels::Column::Priority, Expr::value(priority))
            .filter(event_levels::Column::EventLevelName.eq(name))
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), sea_orm::DbErr> {
        event_levels::Entity::delete_by_id(name.to_string())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }
}
