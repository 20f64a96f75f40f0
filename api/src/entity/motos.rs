use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "motos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub modelo: String,
    pub placa: String,
    pub chassi: String,
    pub problema_identificado: Option<String>,
    pub vaga_id: Option<i64>,
    /// JSON array of defect descriptions
    #[sea_orm(column_type = "JsonBinary")]
    pub defeitos: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
