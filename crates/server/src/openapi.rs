use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Inbound produto payload: raw numeric price and raw delivery flag.
#[derive(utoipa::ToSchema)]
pub struct ProdutoInputDoc {
    pub id: Option<i64>,
    pub nome: String,
    pub preco: f64,
    pub quantidade: i32,
    pub entrega: bool,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Produtos API", version = "v1", description = "API para gerenciar produtos"),
    paths(
        crate::routes::health,
        crate::produtos::list,
        crate::produtos::get,
        crate::produtos::create,
        crate::produtos::update,
        crate::produtos::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProdutoInputDoc,
            crate::produtos::ProdutoDto,
        )
    ),
    tags(
        (name = "health"),
        (name = "produtos")
    )
)]
pub struct ApiDoc;
