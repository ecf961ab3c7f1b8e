use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::prelude::*;

use super::{departments::Departments, event_levels::EventLevels, images::Images, roles::Roles};

pub async fn apply(manager: &SchemaManager<'_>, conn: &DatabaseConnection) -> Result<(), DbErr> {
    if !manager.has_table("users").await? {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserNo)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::UserName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::UserEmail).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::UserPassword)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::UserPhone).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Users::IsSocialed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::RoleId).string_len(50).not_null())
                    .col(ColumnDef::new(Users::DepartmentId).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Users::EventLevelName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::ImageNo).big_integer())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Custom("now()".into())),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Custom("now()".into())),
                    )
                    .col(ColumnDef::new(Users::WithdrawalAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_role")
                            .from(Users::Table, Users::RoleId)
                            .to(Roles::Table, Roles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_department")
                            .from(Users::Table, Users::DepartmentId)
                            .to(Departments::Table, Departments::DepartmentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_event_level")
                            .from(Users::Table, Users::EventLevelName)
                            .to(EventLevels::Table, EventLevels::EventLevelName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_image")
                            .from(Users::Table, Users::ImageNo)
                            .to(Images::Table, Images::ImageNo),
                    )
                    .to_owned(),
            )
            .await?;

        // Email uniqueness holds among active rows only; a withdrawn email is
        // free for re-registration.
        conn.execute(Statement::from_string(
            DbBackend::Postgres,
            "CREATE UNIQUE INDEX IF NOT EXISTS users_email_active_unique \
             ON users (user_email) WHERE withdrawal_at IS NULL"
                .to_string(),
        ))
        .await?;

        conn.execute(Statement::from_string(
            DbBackend::Postgres,
            "CREATE INDEX IF NOT EXISTS users_department_active_idx \
             ON users (department_id) WHERE withdrawal_at IS NULL"
                .to_string(),
        ))
        .await?;
    }

    Ok(())
}

#[derive(Iden)]
enum Users {
    Table,
    UserNo,
    UserName,
    UserEmail,
    UserPassword,
    UserPhone,
    IsSocialed,
    RoleId,
    DepartmentId,
    EventLevelName,
    ImageNo,
    CreatedAt,
    UpdatedAt,
    WithdrawalAt,
}
