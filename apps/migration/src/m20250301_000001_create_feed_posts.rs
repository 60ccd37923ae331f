use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeedPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FeedPosts::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(FeedPosts::Title).string().not_null())
                    .col(ColumnDef::new(FeedPosts::Content).text().not_null())
                    .col(ColumnDef::new(FeedPosts::MediaReference).string())
                    .col(ColumnDef::new(FeedPosts::SourceReference).string())
                    .col(ColumnDef::new(FeedPosts::ScheduledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(FeedPosts::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(FeedPosts::Author).string())
                    .col(ColumnDef::new(FeedPosts::Emotion).string())
                    .col(ColumnDef::new(FeedPosts::Cause).string())
                    .col(ColumnDef::new(FeedPosts::Location).string())
                    .col(ColumnDef::new(FeedPosts::Latitude).double())
                    .col(ColumnDef::new(FeedPosts::Longitude).double())
                    .col(ColumnDef::new(FeedPosts::DistanceKm).double())
                    .col(ColumnDef::new(FeedPosts::DurationMinutes).integer())
                    .col(ColumnDef::new(FeedPosts::Difficulty).string_len(16))
                    .col(ColumnDef::new(FeedPosts::BackgroundColor).string_len(32))
                    .col(ColumnDef::new(FeedPosts::RegistrationLink).string())
                    .col(ColumnDef::new(FeedPosts::LinkedRouteId).uuid())
                    .col(
                        ColumnDef::new(FeedPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FeedPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feed_posts_created_at")
                    .table(FeedPosts::Table)
                    .col(FeedPosts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feed_posts_kind")
                    .table(FeedPosts::Table)
                    .col(FeedPosts::Kind)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedPosts {
    Table,
    Id,
    Kind,
    Title,
    Content,
    MediaReference,
    SourceReference,
    ScheduledAt,
    Tags,
    Author,
    Emotion,
    Cause,
    Location,
    Latitude,
    Longitude,
    DistanceKm,
    DurationMinutes,
    Difficulty,
    BackgroundColor,
    RegistrationLink,
    LinkedRouteId,
    CreatedAt,
    UpdatedAt,
}
