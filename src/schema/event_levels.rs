use sea_orm_migration::prelude::*;

pub async fn apply(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if !manager.has_table("event_levels").await? {
        manager
            .create_table(
                Table::create()
                    .table(EventLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventLevels::EventLevelName)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventLevels::EventLevelDetails)
                            .string_len(300)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventLevels::Priority).integer().not_null())
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[derive(Iden)]
pub enum EventLevels {
    Table,
    EventLevelName,
    EventLevelDetails,
    Priority,
}
