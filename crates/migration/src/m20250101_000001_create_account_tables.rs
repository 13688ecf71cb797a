//! Migration: Create account tables
//!
//! Universities, students, employers and admins. Students reference a
//! university and block its deletion while linked.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Universities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Universities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Universities::Name).string().not_null())
                    .col(ColumnDef::new(Universities::Location).string().not_null())
                    .col(ColumnDef::new(Universities::Website).string().null())
                    .col(ColumnDef::new(Universities::LogoUrl).string().null())
                    .col(ColumnDef::new(Universities::Description).text().null())
                    .col(
                        ColumnDef::new(Universities::PartnershipBenefits)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Universities::IsPartner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Universities::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Universities::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Universities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Universities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Password).string().not_null())
                    .col(ColumnDef::new(Students::College).string().not_null())
                    .col(ColumnDef::new(Students::Degree).string().not_null())
                    .col(ColumnDef::new(Students::Year).integer().not_null())
                    .col(ColumnDef::new(Students::Interests).json().not_null())
                    .col(ColumnDef::new(Students::CvPath).string().null())
                    .col(
                        ColumnDef::new(Students::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Students::UniversityId).string().null())
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_university_id")
                            .from(Students::Table, Students::UniversityId)
                            .to(Universities::Table, Universities::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_university_id")
                    .table(Students::Table)
                    .col(Students::UniversityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Employers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Employers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employers::Password).string().not_null())
                    .col(ColumnDef::new(Employers::Company).string().not_null())
                    .col(ColumnDef::new(Employers::Designation).string().not_null())
                    .col(
                        ColumnDef::new(Employers::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Employers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Employers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Admins::Name).string().not_null())
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::Password).string().not_null())
                    .col(
                        ColumnDef::new(Admins::Role)
                            .string_len(16)
                            .not_null()
                            .default("ADMIN"),
                    )
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Admins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Universities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Universities {
    Table,
    Id,
    Name,
    Location,
    Website,
    LogoUrl,
    Description,
    PartnershipBenefits,
    IsPartner,
    IsVisible,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    Table,
    Id,
    Name,
    Email,
    Password,
    College,
    Degree,
    Year,
    Interests,
    CvPath,
    IsVerified,
    UniversityId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Employers {
    Table,
    Id,
    Name,
    Email,
    Password,
    Company,
    Designation,
    IsVerified,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Name,
    Email,
    Password,
    Role,
    CreatedAt,
    UpdatedAt,
}
