// relay/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use orderform::StoreSelection;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// Products the given store may order, in display order.
#[instrument(name = "handler::visible_products", skip(app_state, query))]
pub async fn visible_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<StoreSelection>,
) -> Result<HttpResponse, AppError> {
  let store = query.resolve();
  let products = app_state.catalog.visible_for(&store);
  info!(store_code = %store, products = products.len(), "Serving visible products.");

  Ok(HttpResponse::Ok().json(json!({
      "store_code": store,
      "products": products
  })))
}
