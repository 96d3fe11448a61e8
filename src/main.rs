//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let schedule_routes = Router::new()
        .route("/", get(handlers::schedule::get_schedule))
        .route("/generate", post(handlers::schedule::generate_schedule))
        .route(
            "/shift",
            post(handlers::schedule::create_shift)
                .put(handlers::schedule::update_shift)
                .delete(handlers::schedule::delete_shift),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let shift_routes = Router::new()
        .route("/my", get(handlers::shifts::my_shifts))
        .route("/available", get(handlers::shifts::available_shifts))
        .route(
            "/trade",
            post(handlers::shifts::request_trade)
                .put(handlers::shifts::resolve_trade)
                .get(handlers::shifts::list_trades),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let availability_routes = Router::new()
        .route(
            "/",
            post(handlers::availability::set_availability)
                .get(handlers::availability::get_availability),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let time_off_routes = Router::new()
        .route(
            "/",
            post(handlers::time_off::request_time_off).get(handlers::time_off::list_time_off),
        )
        .route("/{id}", put(handlers::time_off::review_time_off))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let tips_routes = Router::new()
        .route(
            "/",
            post(handlers::tips::add_tip).get(handlers::tips::list_tips),
        )
        .route("/stats", get(handlers::tips::tip_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // A consulta do horário é pública; a alteração fica atrás do auth.
    let operating_hours_routes = Router::new()
        .route("/", get(handlers::settings::get_operating_hours))
        .route(
            "/",
            post(handlers::settings::set_operating_hours).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_middleware),
            ),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/schedule", schedule_routes)
        .nest("/api/shifts", shift_routes)
        .nest("/api/availability", availability_routes)
        .nest("/api/time-off", time_off_routes)
        .nest("/api/tips", tips_routes)
        .nest("/api/operating-hours", operating_hours_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
