// src/models/lookup.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Par (id, nome) usado para popular campos de seleção no formulário de compras
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct LookupOption {
    pub id: Uuid,
    #[schema(example = "Nubank")]
    pub name: String,
}
