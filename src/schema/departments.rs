use sea_orm_migration::prelude::*;

pub async fn apply(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if !manager.has_table("departments").await? {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::DepartmentId)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::DepartmentName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Departments::MainDashboardUid).string_len(200))
                    .col(ColumnDef::new(Departments::MainDashboardTitle).string_len(200))
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[derive(Iden)]
pub enum Departments {
    Table,
    DepartmentId,
    DepartmentName,
    MainDashboardUid,
    MainDashboardTitle,
}
