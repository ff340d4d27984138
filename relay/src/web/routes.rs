// relay/src/web/routes.rs

use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

use crate::web::handlers::{catalog_handlers, order_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Browsers call the relay cross-origin from the mini-app page.
fn cors_headers() -> DefaultHeaders {
  DefaultHeaders::new()
    .add(("Access-Control-Allow-Origin", "*"))
    .add(("Access-Control-Allow-Methods", "POST,OPTIONS"))
    .add(("Access-Control-Allow-Headers", "Content-Type,X-ORDER-KEY"))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .route(
        "/catalog",
        web::get().to(catalog_handlers::visible_products_handler),
      )
      .service(
        web::resource("/order")
          .route(web::post().to(order_handlers::relay_order_handler))
          .route(web::method(Method::OPTIONS).to(order_handlers::preflight_handler))
          .default_service(web::to(order_handlers::method_not_allowed_handler)),
      )
      .wrap(cors_headers()),
  );
}
