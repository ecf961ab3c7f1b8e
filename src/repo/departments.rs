use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{entities::departments, state::DatabaseClient};

#[async_trait]
pub trait DepartmentsRepo: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr>;
    async fn find(&self, id: &str) -> Result<Option<departments::Model>, sea_orm::DbErr>;
    async fn list(&self) -> Result<Vec<departments::Model>, sea_orm::DbErr>;
    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr>;
    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr>;
    async fn update_dashboard(
        &self,
        id: &str,
        dashboard_uid: &str,
        dashboard_title: &str,
    ) -> Result<(), sea_orm::DbErr>;
    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr>;
}

pub struct SeaOrmDepartmentsRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmDepartmentsRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentsRepo for SeaOrmDepartmentsRepo {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr> {
        let found = departments::Entity::find_by_id(id.to_string())
            .one(self.db.conn())
            .await?;
        Ok(found.is_some())
    }

    async fn find(&self, id: &str) -> Result<Option<departments::Model>, sea_orm::DbErr> {
        departments::Entity::find_by_id(id.to_string())
            .one(self.db.conn())
            .await
    }

    async fn list(&self) -> Result<Vec<departments::Model>, sea_orm::DbErr> {
        departments::Entity::find()
            .order_by_asc(departments::Column::DepartmentId)
            .all(self.db.conn())
            .await
    }

    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        departments::ActiveModel {
            department_id: Set(id.to_string()),
            department_name: Set(name.to_string()),
            main_dashboard_uid: Set(None),
            main_dashboard_title: Set(None),
        }
        .insert(self.db.conn())
        .await?;
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        departments::Entity::update_many()
            .col_expr(departments::Column::DepartmentName, Expr::value(name))
            .filter(departments::Column::DepartmentId.eq(id))
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn update_dashboard(
        &self,
        id: &str,
        dashboard_uid: &str,
        dashboard_title: &str,
    ) -> Result<(), sea_orm::DbErr> {
        departments::Entity::update_many()
            .col_expr(
                departments::Column::MainDashboardUid,
                Expr::value(dashboard_uid),
            )
            .col_expr(
                departments::Column::MainDashboardTitle,
                Expr::value(dashboard_title),
            )
            .filter(departments::Column::DepartmentId.eq(id))
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr> {
        departments::Entity::delete_by_id(id.to_string())
            .exec(self.db.conn())
            .await?;
        Ok(())
    }
}
