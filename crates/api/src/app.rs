//! Application state and router construction.
//!
//! Every component is built once here with its dependencies passed in;
//! nothing is looked up from a global container.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::store::{CustomerStore, DoctorStore, NotificationQueue, ScheduleStore, UserStore};
use persistence::repositories::{
    CustomerRepository, DoctorRepository, NotificationJobRepository, ScheduleRepository,
    UserRepository,
};
use shared::jwt::JwtConfig;

use crate::cache::TieredCache;
use crate::config::Config;
use crate::middleware::require_auth;
use crate::routes::{auth, customers, doctors, health, schedules};
use crate::services::{
    AuthService, CustomerService, DoctorService, NotificationService, ScheduleService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub auth_client: reqwest::Client,
    pub customers: Arc<CustomerService>,
    pub doctors: Arc<DoctorService>,
    pub schedules: Arc<ScheduleService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wires repositories, caches, and services from the configuration.
    pub fn new(config: Arc<Config>, pool: PgPool) -> Self {
        let customer_store: Arc<dyn CustomerStore> =
            Arc::new(CustomerRepository::new(pool.clone()));
        let doctor_store: Arc<dyn DoctorStore> = Arc::new(DoctorRepository::new(pool.clone()));
        let schedule_store: Arc<dyn ScheduleStore> =
            Arc::new(ScheduleRepository::new(pool.clone()));
        let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
        let queue: Arc<dyn NotificationQueue> =
            Arc::new(NotificationJobRepository::new(pool.clone()));

        let customers = Arc::new(CustomerService::new(
            customer_store.clone(),
            Arc::new(TieredCache::new(&config.cache)),
        ));
        let doctors = Arc::new(DoctorService::new(
            doctor_store.clone(),
            Arc::new(TieredCache::new(&config.cache)),
        ));
        let schedules = Arc::new(ScheduleService::new(
            schedule_store,
            customer_store,
            doctor_store,
            Arc::new(TieredCache::new(&config.cache)),
            NotificationService::new(queue),
        ));

        let jwt = JwtConfig::with_leeway(
            &config.auth.jwt_secret,
            config.auth.token_expiry_secs,
            config.auth.leeway_secs,
        );
        let auth = Arc::new(AuthService::new(user_store, jwt));

        let auth_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.auth.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            pool,
            config,
            auth_client,
            customers,
            doctors,
            schedules,
            auth,
        }
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    let state = AppState::new(config.clone(), pool);

    // Entity and scheduling routes sit behind the remote authorization gate.
    let protected_routes = Router::new()
        .route(
            "/api/v1/customers",
            post(customers::create_customer).get(customers::list_customers),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::get_customer)
                .patch(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/api/v1/doctors",
            post(doctors::create_doctor).get(doctors::list_doctors),
        )
        .route(
            "/api/v1/doctors/:id",
            get(doctors::get_doctor)
                .patch(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
        .route(
            "/api/v1/schedules",
            post(schedules::create_schedule).get(schedules::list_schedules),
        )
        .route(
            "/api/v1/schedules/:id",
            get(schedules::get_schedule).delete(schedules::delete_schedule),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Registration, login, and the validate endpoint the gate itself calls.
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/validate", post(auth::validate));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
