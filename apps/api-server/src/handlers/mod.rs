//! HTTP handlers and route configuration.

mod feed;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/feed")
                    .route("", web::get().to(feed::list_feed))
                    .route("", web::post().to(feed::create_post))
                    .route("/validate", web::post().to(feed::validate_post))
                    .route("/type/{kind}", web::get().to(feed::list_by_kind))
                    .route("/tag/{tag}", web::get().to(feed::list_by_tag))
                    .route("/{id}", web::get().to(feed::get_post))
                    .route("/{id}", web::put().to(feed::update_post))
                    .route("/{id}", web::delete().to(feed::delete_post)),
            ),
    );
}
