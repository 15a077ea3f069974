use crate::entities::{design_products, designs};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const PAIR_INDEX: &str = "idx_design_products_design_product";
const CREATOR_INDEX: &str = "idx_designs_creator_status";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(PAIR_INDEX)
                    .table(design_products::Entity)
                    .col(design_products::Column::DesignId)
                    .col(design_products::Column::ProductId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(CREATOR_INDEX)
                    .table(designs::Entity)
                    .col(designs::Column::CreatorId)
                    .col(designs::Column::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(CREATOR_INDEX)
                    .table(designs::Entity)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name(PAIR_INDEX)
                    .table(design_products::Entity)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
