//! Migration: Create tracking tables
//!
//! Sessions keyed by the client token, plus the page views and actions
//! recorded under them. The unique `session_id` constraint is what settles
//! concurrent first calls for the same token.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackingSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackingSessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrackingSessions::SessionId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TrackingSessions::UserType)
                            .string_len(16)
                            .not_null()
                            .default("ANONYMOUS"),
                    )
                    .col(ColumnDef::new(TrackingSessions::UserId).string().null())
                    .col(ColumnDef::new(TrackingSessions::StudentId).string().null())
                    .col(ColumnDef::new(TrackingSessions::EmployerId).string().null())
                    .col(
                        ColumnDef::new(TrackingSessions::StartTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TrackingSessions::EndTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(TrackingSessions::Duration).big_integer().null())
                    .col(ColumnDef::new(TrackingSessions::UserAgent).text().null())
                    .col(ColumnDef::new(TrackingSessions::Referrer).text().null())
                    .col(ColumnDef::new(TrackingSessions::IpAddress).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracking_sessions_start_time")
                    .table(TrackingSessions::Table)
                    .col(TrackingSessions::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PageViews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PageViews::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(PageViews::SessionId).string().not_null())
                    .col(ColumnDef::new(PageViews::Path).string().not_null())
                    .col(ColumnDef::new(PageViews::Title).string().null())
                    .col(
                        ColumnDef::new(PageViews::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PageViews::ExitTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(PageViews::Duration).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_page_views_session_id")
                            .from(PageViews::Table, PageViews::SessionId)
                            .to(TrackingSessions::Table, TrackingSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Open view lookup: (session, path, exit_time IS NULL)
        manager
            .create_index(
                Index::create()
                    .name("idx_page_views_session_path_exit")
                    .table(PageViews::Table)
                    .col(PageViews::SessionId)
                    .col(PageViews::Path)
                    .col(PageViews::ExitTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_page_views_entry_time")
                    .table(PageViews::Table)
                    .col(PageViews::EntryTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserActions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserActions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(UserActions::SessionId).string().not_null())
                    .col(ColumnDef::new(UserActions::ActionType).string().not_null())
                    .col(ColumnDef::new(UserActions::ActionData).json().not_null())
                    .col(ColumnDef::new(UserActions::Path).string().not_null())
                    .col(
                        ColumnDef::new(UserActions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_actions_session_id")
                            .from(UserActions::Table, UserActions::SessionId)
                            .to(TrackingSessions::Table, TrackingSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_actions_timestamp")
                    .table(UserActions::Table)
                    .col(UserActions::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PageViews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrackingSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrackingSessions {
    Table,
    Id,
    SessionId,
    UserType,
    UserId,
    StudentId,
    EmployerId,
    StartTime,
    EndTime,
    Duration,
    UserAgent,
    Referrer,
    IpAddress,
}

#[derive(DeriveIden)]
enum PageViews {
    Table,
    Id,
    SessionId,
    Path,
    Title,
    EntryTime,
    ExitTime,
    Duration,
}

#[derive(DeriveIden)]
enum UserActions {
    Table,
    Id,
    SessionId,
    ActionType,
    ActionData,
    Path,
    Timestamp,
}
