use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    Set, TransactionError, TransactionTrait,
};

use crate::{
    entities::{images, users},
    state::DatabaseClient,
};

/// Profile image store. Attach and detach pair an image row mutation with the
/// owning user's reference column, so either both land or neither does.
#[async_trait]
pub trait ImagesRepo: Send + Sync {
    async fn find_by_image_no(&self, image_no: i64)
        -> Result<Option<images::Model>, sea_orm::DbErr>;
    async fn attach(&self, user_no: i64, image_path: &str)
        -> Result<images::Model, sea_orm::DbErr>;
    async fn update_path(&self, image_no: i64, image_path: &str) -> Result<(), sea_orm::DbErr>;
    async fn detach(&self, user_no: i64, image_no: i64) -> Result<(), sea_orm::DbErr>;
}

pub struct SeaOrmImagesRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmImagesRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}

fn flatten(err: TransactionError<sea_orm::DbErr>) -> sea_orm::DbErr {
    match err {
        TransactionError::Connection(err) => err,
        TransactionError::Transaction(err) => err,
    }
}

async fn set_user_image(
    txn: &DatabaseTransaction,
    user_no: i64,
    image_no: Option<i64>,
) -> Result<(), sea_orm::DbErr> {
    users::Entity::update_many()
        .col_expr(users::Column::ImageNo, Expr::value(image_no))
        .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(users::Column::UserNo.eq(user_no))
        .filter(users::Column::WithdrawalAt.is_null())
        .exec(txn)
        .await?;
    Ok(())
}

#[async_trait]
impl ImagesRepo for SeaOrmImagesRepo {
    async fn find_by_image_no(
        &self,
        image_no: i64,
    ) -> Result<Option<images::Model>, sea_orm::DbErr> {
        images::Entity::find_by_id(image_no).one(self.db.conn()).await
    }

    async fn attach(
        &self,
        user_no: i64,
        image_path: &str,
    ) -> Result<images::Model, sea_orm::DbErr> {
        let image_path = image_path.to_string();
        self.db
            .conn()
            .transaction::<_, images::Model, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let image = images::ActiveModel {
                        image_path: Set(image_path),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    set_user_image(txn, user_no, Some(image.image_no)).await?;
                    Ok(image)
                })
            })
            .await
            .map_err(flatten)
    }

    async fn update_path(&self, image_no: i64, image_path: &str) -> Result<(), sea_orm::DbErr> {
        images::Entity::update_many()
            .col_expr(images::Column::ImagePath, Expr::value(image_path))
            .filter(images::Column::ImageNo.eq(image_no))
            .exec(self.db.conn())
            .await?;
        Ok(())
    }

    async fn detach(&self, user_no: i64, image_no: i64) -> Result<(), sea_orm::DbErr> {
        self.db
            .conn()
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    set_user_image(txn, user_no, None).await?;
                    images::Entity::delete_by_id(image_no).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(flatten)
    }
}
