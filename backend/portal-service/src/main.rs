use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use portal_service::handlers;
use portal_service::services::EmailService;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "portal-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "portal-service"
        })),
    }
}

async fn readiness_check(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({"ready": true})),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": format!("PostgreSQL connection failed: {}", e)
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match portal_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting portal-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool (standardized)
    let mut db_cfg = DbPoolConfig::from_env("portal-service").unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_cfg.max_connections < config.database.max_connections {
        db_cfg.max_connections = config.database.max_connections;
    }

    db_cfg.log_config();
    let db_pool = match create_pg_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Connected to database via db-pool crate");

    // Apply pending migrations on startup
    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Database migration failed: {}", e);
        eprintln!("ERROR: Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let email_service = match EmailService::new(&config.email) {
        Ok(svc) => svc,
        Err(e) => {
            tracing::error!("Email service initialization failed: {}", e);
            eprintln!("ERROR: Failed to initialize email service: {}", e);
            std::process::exit(1);
        }
    };
    if email_service.is_enabled() {
        tracing::info!("Inquiry notifications enabled");
    } else {
        tracing::info!("Inquiry notifications disabled (no-op mode)");
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let email_data = web::Data::new(email_service);

    let server = HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(email_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_check))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/content")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_content))
                                    .route(web::get().to(handlers::list_content)),
                            )
                            .route("/search", web::get().to(handlers::search_content))
                            .service(
                                web::resource("/{content_id}")
                                    .route(web::get().to(handlers::get_content))
                                    .route(web::put().to(handlers::update_content))
                                    .route(web::delete().to(handlers::delete_content)),
                            )
                            .route(
                                "/{content_id}/publish",
                                web::post().to(handlers::publish_content),
                            )
                            .route(
                                "/{content_id}/unpublish",
                                web::post().to(handlers::unpublish_content),
                            )
                            .route(
                                "/{content_id}/tags",
                                web::post().to(handlers::attach_content_tag),
                            )
                            .route(
                                "/{content_id}/tags/{name}",
                                web::delete().to(handlers::detach_content_tag),
                            ),
                    )
                    .service(
                        web::scope("/projects")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_project))
                                    .route(web::get().to(handlers::list_projects)),
                            )
                            .service(
                                web::resource("/{project_id}")
                                    .route(web::get().to(handlers::get_project))
                                    .route(web::put().to(handlers::update_project))
                                    .route(web::delete().to(handlers::delete_project)),
                            )
                            .route(
                                "/{project_id}/tags",
                                web::post().to(handlers::attach_project_tag),
                            )
                            .route(
                                "/{project_id}/tags/{name}",
                                web::delete().to(handlers::detach_project_tag),
                            ),
                    )
                    .service(
                        web::scope("/inquiries")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_inquiry))
                                    .route(web::get().to(handlers::list_inquiries)),
                            )
                            .route("/{inquiry_id}", web::get().to(handlers::get_inquiry))
                            .route(
                                "/{inquiry_id}/status",
                                web::post().to(handlers::update_inquiry_status),
                            ),
                    )
                    .service(
                        web::scope("/tags")
                            .route("", web::get().to(handlers::list_tags))
                            .route("/prune", web::post().to(handlers::prune_tags)),
                    ),
            )
    })
    .bind(&bind_address)?
    .run();

    server.await?;

    tracing::info!("Portal-service shutting down");
    Ok(())
}
