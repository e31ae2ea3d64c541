use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skillshare_backend::{
    config::Config, db::connection::create_pool, docs, handlers,
    middleware as auth_middleware, state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillshare_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_expiration_hours = config.jwt_expiration_hours,
        port = config.port,
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let port = config.port;
    let state = AppState::new(pool, config);

    // Build public routes (no auth)
    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/docs/openapi.json", get(docs::openapi_json));

    // Build user-protected routes (auth required)
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/api/skills",
            get(handlers::skills::list_skills).post(handlers::skills::create_skill),
        )
        .route(
            "/api/skills/{id}",
            get(handlers::skills::get_skill)
                .put(handlers::skills::update_skill)
                .delete(handlers::skills::delete_skill),
        )
        .route(
            "/api/skills/category/{category}",
            get(handlers::skills::list_skills_by_category),
        )
        .route(
            "/api/sessions",
            get(handlers::sessions::list_sessions).post(handlers::sessions::create_session),
        )
        .route(
            "/api/sessions/{id}",
            get(handlers::sessions::get_session)
                .put(handlers::sessions::update_session)
                .delete(handlers::sessions::delete_session),
        )
        .route(
            "/api/sessions/{id}/availability",
            get(handlers::sessions::get_session_availability),
        )
        .route(
            "/api/sessions/{id}/rating",
            get(handlers::sessions::get_session_rating),
        )
        .route(
            "/api/sessions/{id}/deactivate",
            post(handlers::sessions::deactivate_session),
        )
        .route(
            "/api/sessions/{id}/skills/{skill_id}",
            post(handlers::sessions::add_skill_to_session),
        )
        .route(
            "/api/sessions/instructor/{id}",
            get(handlers::sessions::list_sessions_by_instructor),
        )
        .route(
            "/api/sessions/skill/{id}",
            get(handlers::sessions::list_sessions_by_skill),
        )
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/{id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/bookings/{id}/confirm",
            post(handlers::bookings::confirm_booking),
        )
        .route(
            "/api/bookings/{id}/complete",
            post(handlers::bookings::complete_booking),
        )
        .route(
            "/api/bookings/user/{id}",
            get(handlers::bookings::list_bookings_by_user),
        )
        .route(
            "/api/bookings/session/{id}",
            get(handlers::bookings::list_bookings_by_session),
        )
        .route(
            "/api/reviews",
            get(handlers::reviews::list_reviews).post(handlers::reviews::create_review),
        )
        .route(
            "/api/reviews/{id}",
            get(handlers::reviews::get_review)
                .put(handlers::reviews::update_review)
                .delete(handlers::reviews::delete_review),
        )
        .route(
            "/api/reviews/session/{id}",
            get(handlers::reviews::list_reviews_by_session),
        )
        .route(
            "/api/reviews/instructor/{id}",
            get(handlers::reviews::list_reviews_by_instructor),
        )
        .route(
            "/api/reviews/user/{id}",
            get(handlers::reviews::list_reviews_by_user),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth,
        ));

    // Build admin-protected routes (auth + admin role)
    let admin_routes = Router::new()
        .route("/api/admin/users", get(handlers::users::list_users))
        .route("/api/admin/bookings", get(handlers::bookings::list_bookings))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::auth_admin,
        ));

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
