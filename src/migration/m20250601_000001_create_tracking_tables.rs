use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageView::Table)
                    .if_not_exists()
                    .col(pk_auto(PageView::Id))
                    .col(integer(PageView::SessionId))
                    .col(text(PageView::Page))
                    .col(double(PageView::TimeSpent))
                    .col(timestamp_with_time_zone(PageView::StartTime))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Button::Table)
                    .if_not_exists()
                    .col(pk_auto(Button::Id))
                    .col(integer(Button::SessionId))
                    .col(integer(Button::Button))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Button::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PageView::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PageView {
    #[sea_orm(iden = "PageView")]
    Table,
    Id,
    SessionId,
    Page,
    TimeSpent,
    StartTime,
}

#[derive(DeriveIden)]
enum Button {
    #[sea_orm(iden = "Button")]
    Table,
    Id,
    SessionId,
    Button,
}
