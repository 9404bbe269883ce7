use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FileMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileMetadata::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FileMetadata::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FileMetadata::Size).big_integer().not_null())
                    .col(ColumnDef::new(FileMetadata::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(FileMetadata::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // One content row per metadata row, removed together with it
        manager
            .create_table(
                Table::create()
                    .table(FileContent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileContent::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FileContent::FileMetadataId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FileContent::Bytes).binary().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_file_content_file_metadata_id")
                            .from(FileContent::Table, FileContent::FileMetadataId)
                            .to(FileMetadata::Table, FileMetadata::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FileContent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FileMetadata::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum FileMetadata {
    Table,
    Id,
    Name,
    Size,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FileContent {
    Table,
    Id,
    FileMetadataId,
    Bytes,
}
