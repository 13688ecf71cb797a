//! Migration: Create jobs and bookmarked_jobs tables

use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_account_tables::{Employers, Students};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jobs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::Title).string().not_null())
                    .col(ColumnDef::new(Jobs::Description).text().not_null())
                    .col(ColumnDef::new(Jobs::JobType).string().not_null())
                    .col(ColumnDef::new(Jobs::Location).string().not_null())
                    .col(ColumnDef::new(Jobs::Stipend).string().not_null())
                    .col(ColumnDef::new(Jobs::Duration).string().not_null())
                    .col(ColumnDef::new(Jobs::ApplyLink).string().not_null())
                    .col(
                        ColumnDef::new(Jobs::IsRemote)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobs::IsPaid).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Jobs::IsShortTerm)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobs::RequiredDegree).string().null())
                    .col(
                        ColumnDef::new(Jobs::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Jobs::EmployerId).string().not_null())
                    .col(
                        ColumnDef::new(Jobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_jobs_employer_id")
                            .from(Jobs::Table, Jobs::EmployerId)
                            .to(Employers::Table, Employers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Job limit checks and the employer dashboard filter by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_employer_id_status")
                    .table(Jobs::Table)
                    .col(Jobs::EmployerId)
                    .col(Jobs::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookmarkedJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookmarkedJobs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookmarkedJobs::StudentId).string().not_null())
                    .col(ColumnDef::new(BookmarkedJobs::JobId).string().not_null())
                    .col(
                        ColumnDef::new(BookmarkedJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmarked_jobs_student_id")
                            .from(BookmarkedJobs::Table, BookmarkedJobs::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmarked_jobs_job_id")
                            .from(BookmarkedJobs::Table, BookmarkedJobs::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookmarked_jobs_student_job")
                    .table(BookmarkedJobs::Table)
                    .col(BookmarkedJobs::StudentId)
                    .col(BookmarkedJobs::JobId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookmarkedJobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    Title,
    Description,
    JobType,
    Location,
    Stipend,
    Duration,
    ApplyLink,
    IsRemote,
    IsPaid,
    IsShortTerm,
    RequiredDegree,
    Status,
    EmployerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BookmarkedJobs {
    Table,
    Id,
    StudentId,
    JobId,
    CreatedAt,
}
