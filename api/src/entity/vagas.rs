use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vagas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub numero: i32,
    /// `TipoVaga` code
    pub tipo: i32,
    /// `StatusVaga` code
    pub status: i32,
    pub patio_id: i64,
    /// Current occupant
    pub moto_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::patios::Entity",
        from = "Column::PatioId",
        to = "super::patios::Column::Id"
    )]
    Patio,
}

impl Related<super::patios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
