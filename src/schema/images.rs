use sea_orm_migration::prelude::*;

pub async fn apply(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if !manager.has_table("images").await? {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::ImageNo)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::ImagePath).string_len(200).not_null())
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[derive(Iden)]
pub enum Images {
    Table,
    ImageNo,
    ImagePath,
}
