use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "patios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vagas::Entity")]
    Vagas,
}

impl Related<super::vagas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vagas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
