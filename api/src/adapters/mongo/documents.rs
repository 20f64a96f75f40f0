//! BSON document shapes
//!
//! The occupant of a space is embedded in the space document.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    AllocatedMoto, Email, Moto, MotoId, Patio, PatioId, Placa, StatusVaga, TipoUsuario, TipoVaga,
    Usuario, UsuarioId, Vaga, VagaId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotoDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub modelo: String,
    pub placa: String,
    pub chassi: String,
    #[serde(default)]
    pub problema_identificado: Option<String>,
    #[serde(default)]
    pub vaga_id: Option<i64>,
    #[serde(default)]
    pub defeitos: Vec<String>,
}

impl From<&Moto> for MotoDocument {
    fn from(moto: &Moto) -> Self {
        Self {
            id: moto.id.0,
            modelo: moto.modelo.clone(),
            placa: moto.placa.to_string(),
            chassi: moto.chassi.clone(),
            problema_identificado: moto.problema_identificado.clone(),
            vaga_id: moto.vaga_id.map(|v| v.0),
            defeitos: moto.defeitos.clone(),
        }
    }
}

impl From<MotoDocument> for Moto {
    fn from(doc: MotoDocument) -> Self {
        Moto {
            id: MotoId(doc.id),
            modelo: doc.modelo,
            placa: Placa::from_stored(doc.placa),
            chassi: doc.chassi,
            problema_identificado: doc.problema_identificado,
            vaga_id: doc.vaga_id.filter(|id| *id > 0).map(VagaId),
            defeitos: doc.defeitos,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VagaDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub numero: i32,
    pub tipo: i32,
    pub status: i32,
    pub patio_id: i64,
    #[serde(default)]
    pub moto: Option<AllocatedMoto>,
}

impl From<&Vaga> for VagaDocument {
    fn from(vaga: &Vaga) -> Self {
        Self {
            id: vaga.id.0,
            numero: vaga.numero,
            tipo: vaga.tipo.code(),
            status: vaga.status.code(),
            patio_id: vaga.patio_id.0,
            moto: vaga.moto.clone(),
        }
    }
}

impl From<VagaDocument> for Vaga {
    fn from(doc: VagaDocument) -> Self {
        Vaga {
            id: VagaId(doc.id),
            numero: doc.numero,
            tipo: TipoVaga::from_code(doc.tipo).unwrap_or(TipoVaga::SemProblema),
            status: StatusVaga::from_code(doc.status).unwrap_or(StatusVaga::Livre),
            patio_id: PatioId(doc.patio_id),
            moto: doc.moto,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatioDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub nome: String,
}

impl From<&Patio> for PatioDocument {
    fn from(patio: &Patio) -> Self {
        Self {
            id: patio.id.0,
            nome: patio.nome.clone(),
        }
    }
}

impl From<PatioDocument> for Patio {
    fn from(doc: PatioDocument) -> Self {
        Patio {
            id: PatioId(doc.id),
            nome: doc.nome,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub tipo: i32,
}

impl From<&Usuario> for UsuarioDocument {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id.0,
            nome: usuario.nome.clone(),
            email: usuario.email.to_string(),
            senha_hash: usuario.senha_hash.clone(),
            tipo: usuario.tipo.code(),
        }
    }
}

impl From<UsuarioDocument> for Usuario {
    fn from(doc: UsuarioDocument) -> Self {
        Usuario {
            id: UsuarioId(doc.id),
            nome: doc.nome,
            email: Email::from_stored(doc.email),
            senha_hash: doc.senha_hash,
            tipo: TipoUsuario::from_code(doc.tipo).unwrap_or(TipoUsuario::Mecanico),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_moto, test_vaga};
    use mongodb::bson;

    #[test]
    fn vaga_document_embeds_occupant() {
        let vaga = Vaga {
            status: StatusVaga::Ocupada,
            moto: Some(AllocatedMoto::placeholder(MotoId(7))),
            ..test_vaga(VagaId(1), 12)
        };

        let doc = bson::to_document(&VagaDocument::from(&vaga)).unwrap();
        assert_eq!(doc.get_i64("_id").unwrap(), 1);
        assert_eq!(doc.get_i32("status").unwrap(), 1);
        assert_eq!(
            doc.get_document("moto").unwrap().get_i64("id").unwrap(),
            7
        );

        let back: VagaDocument = bson::from_document(doc).unwrap();
        assert_eq!(Vaga::from(back), vaga);
    }

    #[test]
    fn zero_vaga_id_reads_as_unassigned() {
        let mut doc = MotoDocument::from(&test_moto(MotoId(3), "ABC1D23"));
        doc.vaga_id = Some(0);
        assert_eq!(Moto::from(doc).vaga_id, None);
    }
}
