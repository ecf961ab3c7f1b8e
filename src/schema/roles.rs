use sea_orm_migration::prelude::*;

pub async fn apply(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if !manager.has_table("roles").await? {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::RoleId)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::RoleName).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[derive(Iden)]
pub enum Roles {
    Table,
    RoleId,
    RoleName,
}
