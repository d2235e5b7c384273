//! Calculator routes
//!
//! Every endpoint gathers the same three inputs (mode hints, measurement,
//! packaging) and hands them to the one calculator pipeline:
//! - generic calculation from a JSON body or query parameters
//! - per-mode calculation (area, volume, linear)
//! - product calculation, with packaging read from the catalog
//! - area material presets

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{
    CalculateRequest, CalculationResponse, MaterialPresetResponse, Mode, Product,
};
use crate::error::{ApiError, ApiResult};
use crate::services::calculator::{presets::AreaMaterial, request, share};

/// POST /calculator/calculate
///
/// Mode comes from `type`, `calculationType`, or the packaging metadata.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    run(&state, req, None).await.map(DataResponse::new)
}

/// GET /calculator/calculate
///
/// Same inputs as the POST variant, as query parameters.
pub async fn calculate_query(
    State(state): State<Arc<AppState>>,
    Query(req): Query<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    run(&state, req, None).await.map(DataResponse::new)
}

/// POST /calculator/area
pub async fn calculate_area(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    run(&state, req, Some(Mode::Area)).await.map(DataResponse::new)
}

/// POST /calculator/volume
pub async fn calculate_volume(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    run(&state, req, Some(Mode::Volume)).await.map(DataResponse::new)
}

/// POST /calculator/linear
pub async fn calculate_linear(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    run(&state, req, Some(Mode::Linear)).await.map(DataResponse::new)
}

/// GET /products/:product_id/calculate
///
/// Product page calculation: the manager-set type and stored packaging
/// metadata drive the calculation; the customer supplies the measurement.
pub async fn calculate_for_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Query(mut req): Query<CalculateRequest>,
) -> ApiResult<DataResponse<CalculationResponse>> {
    req.product_id = Some(product_id);
    run(&state, req, None).await.map(DataResponse::new)
}

/// GET /calculator/presets
pub async fn list_presets() -> DataResponse<Vec<MaterialPresetResponse>> {
    DataResponse::new(
        AreaMaterial::ALL
            .into_iter()
            .map(MaterialPresetResponse::from)
            .collect(),
    )
}

async fn run(
    state: &AppState,
    req: CalculateRequest,
    forced: Option<Mode>,
) -> ApiResult<CalculationResponse> {
    let product = match req.product_id {
        Some(id) => Some(find_product(state, id).await?),
        None => None,
    };

    let input = request::calculation_input(&req, product.as_ref(), forced)?;
    let result = state.calculator.calculate(&input)?;

    tracing::info!(
        product_id = ?req.product_id,
        mode = %result.mode,
        units_needed = ?result.units_needed,
        total_cost = %result.total_cost,
        "Calculated material requirement"
    );

    let product_name = product
        .as_ref()
        .map(|p| p.name.as_str())
        .or(req.product_name.as_deref());
    let share = product_name.map(|name| {
        let shared = share::SharedProduct {
            id: product.as_ref().map(|p| p.id),
            name,
            unit: &input.descriptor.unit_label,
        };
        share::share_payload(&shared, &result, &input.measurement)
    });

    let suggested_material = (result.mode == Mode::Area)
        .then(|| request::suggested_material(&req, product.as_ref()))
        .flatten()
        .map(MaterialPresetResponse::from);

    Ok(CalculationResponse {
        result,
        share,
        suggested_material,
    })
}

async fn find_product(state: &AppState, id: i64) -> ApiResult<Product> {
    state
        .catalog
        .find_product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))
}

#[cfg(test)]
mod tests {
    use axum::{
        async_trait,
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::app::{create_app, AppState};
    use crate::config::{Environment, Settings};
    use crate::domain::Product;
    use crate::services::calculator::WastageDefaults;
    use crate::services::ProductCatalog;

    struct MemoryCatalog {
        products: Vec<Product>,
        healthy: bool,
    }

    #[async_trait]
    impl ProductCatalog for MemoryCatalog {
        async fn find_product(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }

        async fn health_check(&self) -> bool {
            self.healthy
        }
    }

    fn settings() -> Settings {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "postgres://localhost/unused".to_string(),
            database_max_connections: 1,
            database_acquire_timeout_seconds: 1,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            wastage: WastageDefaults::default(),
        }
    }

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Tile Adhesive".to_string(),
                price: Decimal::new(1250, 2),
                unit: "bag".to_string(),
                calculation_type: Some("area".to_string()),
                dimensions: Some(r#"{"coverage": 1.5, "material_type": "area"}"#.to_string()),
            },
            Product {
                id: 2,
                name: "Claw Hammer".to_string(),
                price: Decimal::new(1999, 2),
                unit: "pc".to_string(),
                calculation_type: None,
                dimensions: Some("{not json".to_string()),
            },
            Product {
                id: 3,
                name: "Interior Wall Paint 5L".to_string(),
                price: Decimal::new(20, 0),
                unit: "can".to_string(),
                calculation_type: Some("area".to_string()),
                dimensions: Some("{}".to_string()),
            },
        ]
    }

    fn app_with(healthy: bool) -> Router {
        let catalog = Arc::new(MemoryCatalog {
            products: products(),
            healthy,
        });
        create_app(AppState::new(settings(), catalog))
    }

    fn app() -> Router {
        app_with(true)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn generic_post_calculates_area() {
        let (status, body) = send(
            app(),
            post(
                "/calculator/calculate",
                json!({
                    "type": "area",
                    "length": 4,
                    "width": 3,
                    "wastage": 10,
                    "coverage": 1.5,
                    "unitPrice": 12.5,
                    "unit": "bag"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["mode"], "area");
        assert_eq!(result["unitLabel"], "m²");
        assert_eq!(result["rawAmount"], 12.0);
        assert_eq!(result["wastageAmount"], 1.2);
        assert_eq!(result["totalRequired"], 13.2);
        assert_eq!(result["unitsNeeded"], 9);
        assert_eq!(result["totalCost"], 112.5);
        assert!(body["data"].get("share").is_none());
    }

    #[tokio::test]
    async fn query_parameters_calculate_linear_pieces() {
        let (status, body) = send(
            app(),
            get("/calculator/calculate?type=linear&length=10&pieceLength=2.5&wastage=5&unitPrice=3"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["totalRequired"], 10.5);
        assert_eq!(result["piecesNeeded"], 5);
        assert_eq!(result["unitsNeeded"], 5);
        assert_eq!(result["totalCost"], 15.0);
    }

    #[tokio::test]
    async fn area_route_rejects_missing_width() {
        let (status, body) = send(
            app(),
            post("/calculator/area", json!({"length": 4, "unitPrice": 5})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], "width");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn non_numeric_dimension_is_rejected_with_field() {
        let (status, body) = send(
            app(),
            post(
                "/calculator/volume",
                json!({"length": "two", "width": 2, "depth": 0.1, "unitPrice": 5}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "length");
    }

    #[tokio::test]
    async fn unrecognized_type_is_rejected() {
        let (status, body) = send(
            app(),
            post("/calculator/calculate", json!({"type": "circle", "unitPrice": 5})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "type");
    }

    #[tokio::test]
    async fn volume_route_flags_unresolved_packaging() {
        let (status, body) = send(
            app(),
            post(
                "/calculator/volume",
                json!({"length": 2, "width": 2, "depth": 0.1, "wastage": 15, "unitPrice": 95}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["rawAmount"], 0.4);
        assert_eq!(result["totalRequired"], 0.46);
        assert_eq!(result["unitsNeeded"], 1);
        assert_eq!(result["totalCost"], 43.7);
        assert_eq!(result["warnings"][0]["kind"], "unresolved_packaging");
        assert_eq!(result["warnings"][0]["mode"], "volume");
    }

    #[tokio::test]
    async fn product_calculation_uses_catalog_packaging_and_shares() {
        let (status, body) = send(app(), get("/products/1/calculate?length=4&width=3")).await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["mode"], "area");
        assert_eq!(result["packagingSize"], 1.5);
        assert_eq!(result["unitsNeeded"], 9);
        assert_eq!(result["totalCost"], 112.5);

        let share = &body["data"]["share"];
        assert_eq!(share["productId"], 1);
        assert_eq!(share["productUnit"], "bag");
        assert_eq!(share["projectDimensions"]["length"], 4.0);
        assert_eq!(
            share["message"],
            "You need 9 bag(s) of Tile Adhesive for an area of 4m × 3m. Total cost: $112.50"
        );
    }

    #[tokio::test]
    async fn product_with_malformed_metadata_falls_back_to_unit() {
        let (status, body) = send(app(), get("/products/2/calculate?quantity=2")).await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["mode"], "unit");
        assert_eq!(result["unitLabel"], "pc");
        assert_eq!(result["unitsNeeded"], 2);
        assert_eq!(result["totalCost"], 39.98);
    }

    #[tokio::test]
    async fn name_matched_preset_does_not_size_packaging() {
        let (status, body) = send(app(), get("/products/3/calculate?length=4&width=3")).await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["totalRequired"], 13.2);
        assert_eq!(result["unitsNeeded"], 14);
        assert_eq!(result["totalCost"], 264.0);
        assert!(result.get("packagingSize").is_none());
        assert_eq!(result["warnings"][0]["kind"], "unresolved_packaging");
        assert_eq!(body["data"]["suggestedMaterial"]["value"], "paint");
    }

    #[tokio::test]
    async fn chosen_preset_supplies_coverage() {
        let (status, body) = send(
            app(),
            get("/products/3/calculate?length=4&width=3&material=paint"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["data"]["result"];
        assert_eq!(result["packagingSize"], 10.0);
        assert_eq!(result["unitsNeeded"], 2);
        assert_eq!(result["totalCost"], 40.0);
        assert!(result.get("warnings").is_none());
        assert!(body["data"].get("suggestedMaterial").is_none());
    }

    #[tokio::test]
    async fn cost_overflow_is_rejected() {
        let (status, body) = send(
            app(),
            post(
                "/calculator/area",
                json!({
                    "length": 100000,
                    "width": 100000,
                    "coverage": "0.000001",
                    "unitPrice": "1e19"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "unitPrice");
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let (status, body) = send(app(), get("/products/99/calculate?length=1")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn presets_are_listed() {
        let (status, body) = send(app(), get("/calculator/presets")).await;

        assert_eq!(status, StatusCode::OK);
        let presets = body["data"].as_array().expect("preset list");
        assert_eq!(presets.len(), 5);
        assert_eq!(presets[0]["value"], "paint");
        assert_eq!(presets[0]["defaultCoverage"], 10.0);
    }

    #[tokio::test]
    async fn health_reports_degraded_catalog() {
        let (status, body) = send(app_with(false), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["services"]["calculator"], "ok");
        assert_eq!(body["services"]["catalog"], "error");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = app()
            .oneshot(get("/calculator/presets"))
            .await
            .expect("router response");
        assert!(response.headers().contains_key("x-request-id"));
    }
}
