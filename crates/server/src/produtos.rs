use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use models::produto;
use service::produto_service;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Inbound payload for create and update. Price and delivery flag arrive
/// raw; any submitted id is ignored on create and overridden on update.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProdutoInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub nome: String,
    pub preco: f64,
    pub quantidade: i32,
    pub entrega: bool,
}

/// Client-facing view of a product. `Preço` and `Status para entrega` are
/// derived, output-only fields; clients never submit them.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProdutoDto {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Nome")]
    pub nome: String,
    #[serde(rename = "Preço")]
    pub preco: String,
    #[serde(rename = "Quantidade")]
    pub quantidade: i32,
    #[serde(rename = "Status para entrega")]
    pub status_entrega: String,
}

const PRONTA_ENTREGA: &str = "Pronta Entrega";
const SEM_PRONTA_ENTREGA: &str = "Sem Pronta Entrega";

impl From<produto::Model> for ProdutoDto {
    fn from(m: produto::Model) -> Self {
        Self {
            id: m.id,
            nome: m.nome,
            preco: format!("R$ {:.2}", m.preco),
            quantidade: m.quantidade,
            status_entrega: if m.entrega { PRONTA_ENTREGA } else { SEM_PRONTA_ENTREGA }.to_string(),
        }
    }
}

#[utoipa::path(
    get, path = "/", tag = "produtos",
    responses(
        (status = 200, description = "All products", body = [ProdutoDto]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProdutoDto>>, StatusCode> {
    match produto_service::list_produtos(&state.db).await {
        Ok(rows) => {
            info!(count = rows.len(), "list produtos");
            Ok(Json(rows.into_iter().map(ProdutoDto::from).collect()))
        }
        Err(e) => {
            error!(err = %e, "list produtos failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    get, path = "/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProdutoDto),
        (status = 404, description = "No such product"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ProdutoDto>, StatusCode> {
    match produto_service::get_produto(&state.db, id).await {
        Ok(Some(m)) => Ok(Json(m.into())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(err = %e, id, "get produto failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    post, path = "/", tag = "produtos",
    request_body = crate::openapi::ProdutoInputDoc,
    responses(
        (status = 201, description = "Product created", body = ProdutoDto),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProdutoInput>,
) -> Result<(StatusCode, Json<ProdutoDto>), StatusCode> {
    // Key assignment belongs to the database; whatever id the client sent is dropped.
    match produto_service::save_produto(&state.db, None, &input.nome, input.preco, input.quantidade, input.entrega).await {
        Ok(m) => {
            info!(id = m.id, nome = %m.nome, "created produto");
            Ok((StatusCode::CREATED, Json(m.into())))
        }
        Err(e) => {
            error!(err = %e, "create produto failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    put, path = "/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProdutoInputDoc,
    responses(
        (status = 200, description = "Product replaced", body = ProdutoDto),
        (status = 404, description = "No such product"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProdutoInput>,
) -> Result<Json<ProdutoDto>, StatusCode> {
    // Read before write: a missing row must yield 404, not an upsert-created one.
    // The check and the write are not atomic; a concurrent delete can slip between them.
    match produto_service::get_produto(&state.db, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(err = %e, id, "update produto failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    match produto_service::save_produto(&state.db, Some(id), &input.nome, input.preco, input.quantidade, input.entrega).await {
        Ok(m) => {
            info!(id = m.id, "updated produto");
            Ok(Json(m.into()))
        }
        Err(e) => {
            error!(err = %e, id, "update produto failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    delete, path = "/{id}", tag = "produtos",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No such product"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    // Same read-before-write as update: storage alone would no-op silently.
    match produto_service::get_produto(&state.db, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return StatusCode::NOT_FOUND,
        Err(e) => {
            error!(err = %e, id, "delete produto failed");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    }
    match produto_service::delete_produto(&state.db, id).await {
        Ok(_) => {
            info!(id, "deleted produto");
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            error!(err = %e, id, "delete produto failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
