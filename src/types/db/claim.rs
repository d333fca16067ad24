use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub claim_date: Date,
    pub status: Option<String>,

    // Money and hours are decimals stored as text
    pub hours_worked: String,
    pub hourly_rate: String,
    pub total_amount: String,

    pub submission_date: DateTimeUtc,
    pub last_updated: Option<DateTimeUtc>,
    pub status_notes: Option<String>,
    pub notes: Option<String>,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
