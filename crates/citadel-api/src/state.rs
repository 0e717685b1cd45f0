//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use citadel_auth::{AuthManager, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use citadel_core::config::AppConfig;
use citadel_core::result::AppResult;
use citadel_database::repositories::{ProfileRepository, UserRepository, VisitRepository};
use citadel_database::store::{ProfileStore, UserStore, VisitStore};
use citadel_database::{DatabasePool, MemoryStore};
use citadel_service::query::VisitEnricher;
use citadel_service::{
    CallerResolver, ProvisioningService, QrVerificationService, QueryService,
    VisitLifecycleService,
};

/// The three store seams every service is built from.
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub visits: Arc<dyn VisitStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool.clone())),
            visits: Arc::new(VisitRepository::new(pool)),
        }
    }

    /// One in-memory store behind all three seams.
    pub fn memory(store: &MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            profiles: Arc::new(store.clone()),
            visits: Arc::new(store.clone()),
        }
    }
}

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Present when running against PostgreSQL; probed by `/health`.
    pub db: Option<DatabasePool>,

    pub auth: Arc<AuthManager>,
    pub resolver: Arc<CallerResolver>,

    pub lifecycle: Arc<VisitLifecycleService>,
    pub qr: Arc<QrVerificationService>,
    pub query: Arc<QueryService>,
    pub provisioning: Arc<ProvisioningService>,
}

impl AppState {
    /// Wire every service from configuration and stores.
    pub fn build(config: AppConfig, stores: Stores, db: Option<DatabasePool>) -> AppResult<Self> {
        let Stores {
            users,
            profiles,
            visits,
        } = stores;

        let auth = Arc::new(AuthManager::new(
            Arc::clone(&users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));

        let resolver = Arc::new(CallerResolver::new(
            Arc::clone(&users),
            Arc::clone(&profiles),
        ));
        let enricher = Arc::new(VisitEnricher::new(
            Arc::clone(&visits),
            Arc::clone(&users),
            Arc::clone(&profiles),
        ));

        let lifecycle = Arc::new(VisitLifecycleService::new(
            Arc::clone(&resolver),
            Arc::clone(&visits),
            Arc::clone(&enricher),
            &config.visits,
        )?);
        let qr = Arc::new(QrVerificationService::new(
            Arc::clone(&resolver),
            Arc::clone(&visits),
            Arc::clone(&enricher),
        ));
        let query = Arc::new(QueryService::new(
            Arc::clone(&resolver),
            Arc::clone(&profiles),
            visits,
            enricher,
            config.visits.local_offset()?,
        ));
        let provisioning = Arc::new(ProvisioningService::new(
            users,
            profiles,
            Arc::clone(&auth),
        ));

        Ok(Self {
            config: Arc::new(config),
            db,
            auth,
            resolver,
            lifecycle,
            qr,
            query,
            provisioning,
        })
    }
}
