use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作品集提交表
        manager
            .create_table(
                Table::create()
                    .table(PortfolioSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::PortfolioId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::Version)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::IsCurrentVersion)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::ReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSubmissions::ApprovedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PortfolioSubmissions::Table, PortfolioSubmissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 提交谱系查询索引 (portfolio_id, user_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_submissions_lineage")
                    .table(PortfolioSubmissions::Table)
                    .col(PortfolioSubmissions::PortfolioId)
                    .col(PortfolioSubmissions::UserId)
                    .to_owned(),
            )
            .await?;

        // 版本号在谱系内唯一，并发提交的最后防线
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_submissions_lineage_version")
                    .table(PortfolioSubmissions::Table)
                    .col(PortfolioSubmissions::PortfolioId)
                    .col(PortfolioSubmissions::UserId)
                    .col(PortfolioSubmissions::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评分卡表
        manager
            .create_table(
                Table::create()
                    .table(Scorecards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scorecards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Scorecards::PortfolioSubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scorecards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Scorecards::TotalScore).double().not_null())
                    .col(ColumnDef::new(Scorecards::MaxScore).double().not_null())
                    .col(ColumnDef::new(Scorecards::GeneralComment).text().null())
                    .col(
                        ColumnDef::new(Scorecards::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scorecards::Table, Scorecards::PortfolioSubmissionId)
                            .to(PortfolioSubmissions::Table, PortfolioSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scorecards::Table, Scorecards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分标准表
        manager
            .create_table(
                Table::create()
                    .table(ScoreCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScoreCriteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScoreCriteria::ScorecardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScoreCriteria::CriteriaNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScoreCriteria::CriteriaName).string().not_null())
                    .col(ColumnDef::new(ScoreCriteria::MaxScore).double().not_null())
                    .col(ColumnDef::new(ScoreCriteria::Score).double().not_null())
                    .col(
                        ColumnDef::new(ScoreCriteria::WeightPercent)
                            .double()
                            .not_null()
                            // 权重是 0-100 的百分比，数据库层兜底
                            .check(Expr::col(ScoreCriteria::WeightPercent).between(0.0, 100.0)),
                    )
                    .col(ColumnDef::new(ScoreCriteria::Comment).text().null())
                    .col(
                        ColumnDef::new(ScoreCriteria::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScoreCriteria::Table, ScoreCriteria::ScorecardId)
                            .to(Scorecards::Table, Scorecards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评语表
        manager
            .create_table(
                Table::create()
                    .table(Feedbacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedbacks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Feedbacks::PortfolioSubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Feedbacks::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Feedbacks::OverallComment).text().not_null())
                    .col(ColumnDef::new(Feedbacks::Strengths).text().not_null())
                    .col(
                        ColumnDef::new(Feedbacks::AreasForImprovement)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Feedbacks::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedbacks::Table, Feedbacks::PortfolioSubmissionId)
                            .to(PortfolioSubmissions::Table, PortfolioSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedbacks::Table, Feedbacks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::AnnouncementId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Notifications::IsRead).boolean().not_null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 通知按用户查询索引
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedbacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScoreCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scorecards::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PortfolioSubmissions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Role,
    Status,
    ProfileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PortfolioSubmissions {
    Table,
    Id,
    PortfolioId,
    UserId,
    Version,
    Status,
    IsCurrentVersion,
    SubmittedAt,
    ReviewedAt,
    ApprovedAt,
}

#[derive(DeriveIden)]
enum Scorecards {
    Table,
    Id,
    PortfolioSubmissionId,
    UserId,
    TotalScore,
    MaxScore,
    GeneralComment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScoreCriteria {
    Table,
    Id,
    ScorecardId,
    CriteriaNumber,
    CriteriaName,
    MaxScore,
    Score,
    WeightPercent,
    Comment,
    OrderIndex,
}

#[derive(DeriveIden)]
enum Feedbacks {
    Table,
    Id,
    PortfolioSubmissionId,
    UserId,
    OverallComment,
    Strengths,
    AreasForImprovement,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Title,
    Message,
    NotificationType,
    AnnouncementId,
    IsRead,
    CreatedAt,
}
