use sea_orm_migration::prelude::*;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_owners_table::Migration),
            Box::new(m20250101_000002_create_facilities_table::Migration),
            Box::new(m20250101_000003_create_users_table::Migration),
            Box::new(m20250101_000004_create_reviews_table::Migration),
            Box::new(m20250101_000005_create_chat_messages_table::Migration),
            Box::new(m20250101_000006_create_usage_history_table::Migration),
            Box::new(m20250101_000007_create_notifications_table::Migration),
            Box::new(m20250101_000008_create_payments_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_owners_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_owners_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Owners::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Owners::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Owners::Name).string().not_null())
                        .col(
                            ColumnDef::new(Owners::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Owners::Phone).string().not_null())
                        .col(
                            ColumnDef::new(Owners::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Owners::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Owners {
        Table,
        Id,
        Name,
        Email,
        Phone,
        CreatedAt,
    }
}

mod m20250101_000002_create_facilities_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_facilities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Facilities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Facilities::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Facilities::Name).string().not_null())
                        .col(ColumnDef::new(Facilities::Address).string().not_null())
                        .col(ColumnDef::new(Facilities::Latitude).double().not_null())
                        .col(ColumnDef::new(Facilities::Longitude).double().not_null())
                        .col(
                            ColumnDef::new(Facilities::IsFree)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Facilities::Price)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Facilities::CurrentUsers)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Facilities::Rating)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Facilities::TotalReviews)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Facilities::AdminContact).string().null())
                        .col(ColumnDef::new(Facilities::ImageUrl).string().null())
                        .col(ColumnDef::new(Facilities::OwnerId).big_integer().null())
                        .col(
                            ColumnDef::new(Facilities::MaleStanding)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Facilities::MaleSitting)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Facilities::FemaleSitting)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Facilities::DisabledAccess)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Facilities::Images).json().null())
                        .col(
                            ColumnDef::new(Facilities::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_facilities_owner_id")
                        .table(Facilities::Table)
                        .col(Facilities::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Facilities::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Facilities {
        Table,
        Id,
        Name,
        Address,
        Latitude,
        Longitude,
        IsFree,
        Price,
        CurrentUsers,
        Rating,
        TotalReviews,
        AdminContact,
        ImageUrl,
        OwnerId,
        MaleStanding,
        MaleSitting,
        FemaleSitting,
        DisabledAccess,
        Images,
        CreatedAt,
    }
}

mod m20250101_000003_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                        .col(ColumnDef::new(Users::PasswordHash).string().null())
                        .col(
                            ColumnDef::new(Users::IsGuest)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::CurrentFacilityId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Users::ActiveSince)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Users {
        Table,
        Id,
        Username,
        PasswordHash,
        IsGuest,
        CurrentFacilityId,
        ActiveSince,
        CreatedAt,
    }
}

mod m20250101_000004_create_reviews_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_reviews_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Reviews::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Reviews::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Reviews::FacilityId).big_integer().not_null())
                        .col(ColumnDef::new(Reviews::UserId).big_integer().not_null())
                        .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                        .col(ColumnDef::new(Reviews::Comment).text().null())
                        .col(ColumnDef::new(Reviews::ImagePath).string().null())
                        .col(
                            ColumnDef::new(Reviews::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reviews_facility_id")
                        .table(Reviews::Table)
                        .col(Reviews::FacilityId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Reviews::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Reviews {
        Table,
        Id,
        FacilityId,
        UserId,
        Rating,
        Comment,
        ImagePath,
        CreatedAt,
    }
}

mod m20250101_000005_create_chat_messages_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_chat_messages_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ChatMessages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ChatMessages::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ChatMessages::FacilityId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ChatMessages::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ChatMessages::Message).text().not_null())
                        .col(
                            ColumnDef::new(ChatMessages::Kind)
                                .string_len(20)
                                .not_null()
                                .default("normal"),
                        )
                        .col(
                            ColumnDef::new(ChatMessages::IsFromOwner)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ChatMessages::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_chat_messages_facility_id")
                        .table(ChatMessages::Table)
                        .col(ChatMessages::FacilityId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ChatMessages::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ChatMessages {
        Table,
        Id,
        FacilityId,
        UserId,
        Message,
        Kind,
        IsFromOwner,
        CreatedAt,
    }
}

mod m20250101_000006_create_usage_history_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_usage_history_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UsageHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UsageHistory::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::FacilityId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::StartTime)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::EndTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::DurationMinutes)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(UsageHistory::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_usage_history_user_id")
                        .table(UsageHistory::Table)
                        .col(UsageHistory::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UsageHistory::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum UsageHistory {
        Table,
        Id,
        UserId,
        FacilityId,
        StartTime,
        EndTime,
        DurationMinutes,
        CreatedAt,
    }
}

mod m20250101_000007_create_notifications_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000007_create_notifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                        .col(
                            ColumnDef::new(Notifications::OwnerId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Notifications::FacilityId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Notifications::UserId).big_integer().null())
                        .col(ColumnDef::new(Notifications::Kind).string_len(50).not_null())
                        .col(ColumnDef::new(Notifications::Message).text().not_null())
                        .col(
                            ColumnDef::new(Notifications::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Notifications::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_notifications_owner_id")
                        .table(Notifications::Table)
                        .col(Notifications::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Notifications {
        Table,
        Id,
        OwnerId,
        FacilityId,
        UserId,
        Kind,
        Message,
        IsRead,
        CreatedAt,
    }
}

mod m20250101_000008_create_payments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000008_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Payments::UserId).big_integer().not_null())
                        .col(
                            ColumnDef::new(Payments::FacilityId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::OwnerId).big_integer().not_null())
                        .col(ColumnDef::new(Payments::Method).string_len(20).not_null())
                        .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                        .col(
                            ColumnDef::new(Payments::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Payments::TransferImagePath)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Payments::Note).text().null())
                        .col(
                            ColumnDef::new(Payments::ConfirmedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_user_facility")
                        .table(Payments::Table)
                        .col(Payments::UserId)
                        .col(Payments::FacilityId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_owner_id")
                        .table(Payments::Table)
                        .col(Payments::OwnerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Payments {
        Table,
        Id,
        UserId,
        FacilityId,
        OwnerId,
        Method,
        Amount,
        Status,
        TransferImagePath,
        Note,
        ConfirmedAt,
        CreatedAt,
    }
}
