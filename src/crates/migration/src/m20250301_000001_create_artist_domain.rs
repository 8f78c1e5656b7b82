use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Artist::Id).uuid().not_null().primary_key())
                    // bigserial; insertion order for listing
                    .col(
                        ColumnDef::new(Artist::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Artist::Name).string().not_null())
                    .col(ColumnDef::new(Artist::Img).text().not_null())
                    .col(ColumnDef::new(Artist::Para1).text().not_null().default(""))
                    .col(ColumnDef::new(Artist::Para2).text().not_null().default(""))
                    .col(ColumnDef::new(Artist::Para3).text().not_null().default(""))
                    .col(ColumnDef::new(Artist::HitSong).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Artist::Platforms)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(ColumnDef::new(Artist::Text).text().not_null().default(""))
                    .col(ColumnDef::new(Artist::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Artist::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Artist names are unique across the collection
        manager
            .create_index(
                Index::create()
                    .name("uk_artist_name")
                    .table(Artist::Table)
                    .col(Artist::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uk_artist_seq")
                    .table(Artist::Table)
                    .col(Artist::Seq)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Artist {
    Table,
    Id,
    Seq,
    Name,
    Img,
    Para1,
    Para2,
    Para3,
    HitSong,
    Platforms,
    Text,
    CreatedAt,
    UpdatedAt,
}
