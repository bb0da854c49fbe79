//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod engagement;
mod health;
mod posts;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/verify", web::post().to(auth::verify))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/me", web::put().to(auth::update_profile))
                    .route("/change-password", web::post().to(auth::change_password))
                    .route("/logout", web::post().to(auth::logout)),
            )
            // Post routes (includes per-post engagement)
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/my-posts", web::get().to(posts::my_posts))
                    .route("/{post_id}", web::get().to(posts::get_post))
                    .route("/{post_id}", web::put().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post))
                    .route("/{post_id}/like", web::post().to(engagement::toggle_like))
                    .route("/{post_id}/like", web::delete().to(engagement::unlike))
                    .route(
                        "/{post_id}/like-status",
                        web::get().to(engagement::like_status),
                    )
                    .route(
                        "/{post_id}/bookmark",
                        web::post().to(engagement::toggle_bookmark),
                    )
                    .route(
                        "/{post_id}/bookmark",
                        web::delete().to(engagement::remove_bookmark),
                    )
                    .route(
                        "/{post_id}/bookmark-status",
                        web::get().to(engagement::bookmark_status),
                    ),
            )
            // Comment routes
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create_comment))
                    .route("/post/{post_id}", web::get().to(comments::list_for_post))
                    .route("/{comment_id}", web::delete().to(comments::delete_comment)),
            ),
    );
}
