use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 links 表
        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Link::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Link::OriginalUrl).text().not_null())
                    .col(short_code_column(manager.get_database_backend()))
                    .col(ColumnDef::new(Link::OwnerId).string_len(255).null())
                    .col(
                        ColumnDef::new(Link::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Link::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 短码唯一索引，唯一性以此为准
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_short_code")
                    .table(Link::Table)
                    .col(Link::ShortCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_owner_id")
                    .table(Link::Table)
                    .col(Link::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_created_at")
                    .table(Link::Table)
                    .col(Link::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_links_created_at",
            "idx_links_owner_id",
            "idx_links_short_code",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Link::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await
    }
}

/// 短码区分大小写；MySQL 默认排序规则不区分，需显式指定二进制排序
fn short_code_column(backend: DatabaseBackend) -> ColumnDef {
    let mut column = ColumnDef::new(Link::ShortCode);
    column.string_len(32).not_null();
    if matches!(backend, DatabaseBackend::MySql) {
        column.extra("COLLATE utf8mb4_bin");
    }
    column
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    OriginalUrl,
    ShortCode,
    OwnerId,
    Clicks,
    CreatedAt,
}
