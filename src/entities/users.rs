use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_no: i64,
    pub user_name: String,
    pub user_email: String,
    /// Argon2 digest; the plaintext never touches storage.
    pub user_password: String,
    pub user_phone: String,
    /// Set when the account arrived through a social identity provider
    /// rather than the password sign-up form.
    pub is_socialed: bool,
    pub role_id: String,
    pub department_id: String,
    pub event_level_name: String,
    pub image_no: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub withdrawal_at: Option<DateTimeWithTimeZone>,
}

/// Soft-delete state. Withdrawal is one-way: the timestamp is set once and
/// never cleared, and every authentication/profile/uniqueness lookup filters
/// to active rows.
#[derive(Clone, Debug, PartialEq)]
pub enum Lifecycle {
    Active,
    Withdrawn(DateTimeWithTimeZone),
}

impl Model {
    pub fn lifecycle(&self) -> Lifecycle {
        match self.withdrawal_at {
            None => Lifecycle::Active,
            Some(at) => Lifecycle::Withdrawn(at),
        }
    }

    pub fn is_active(&self) -> bool {
        self.withdrawal_at.is_none()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::DepartmentId"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::RoleId"
    )]
    Role,
    #[sea_orm(
        belongs_to = "super::event_levels::Entity",
        from = "Column::EventLevelName",
        to = "super::event_levels::Column::EventLevelName"
    )]
    EventLevel,
    #[sea_orm(
        belongs_to = "super::images::Entity",
        from = "Column::ImageNo",
        to = "super::images::Column::ImageNo"
    )]
    Image,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::event_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventLevel.def()
    }
}

impl Related<super::images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
