use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub department_id: String,
    pub department_name: String,
    /// Dashboard assignment for the department's landing view; unset until
    /// an operator pins one.
    pub main_dashboard_uid: Option<String>,
    pub main_dashboard_title: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
