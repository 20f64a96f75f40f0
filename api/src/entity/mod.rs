//! SeaORM entities for the relational (v1) store

pub mod motos;
pub mod patios;
pub mod usuarios;
pub mod vagas;
