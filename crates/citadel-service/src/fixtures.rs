//! Seeded in-memory world shared by the service tests.

use std::sync::Arc;

use citadel_auth::{AuthManager, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use citadel_core::config::{AuthConfig, VisitsConfig};
use citadel_core::types::id::UserId;
use citadel_database::MemoryStore;
use citadel_database::store::{NewProfile, ProfileStore, UserStore, VisitStore};
use citadel_entity::user::CreateUser;
use citadel_entity::{Guard, Resident, UserRole, Visit, VisitState};

use crate::caller::CallerResolver;
use crate::context::RequestContext;
use crate::provisioning::{NewAccount, ProvisioningService};
use crate::qr::QrVerificationService;
use crate::query::{QueryService, VisitEnricher};
use crate::visit::{VisitLifecycleService, VisitRequest};

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub resolver: Arc<CallerResolver>,
    pub enricher: Arc<VisitEnricher>,
    pub lifecycle: VisitLifecycleService,
    pub query: QueryService,
    pub qr: QrVerificationService,
    pub provisioning: ProvisioningService,
    pub resident_user: UserId,
    pub resident: Resident,
    pub guard_user: UserId,
    pub guard: Guard,
    pub admin_user: UserId,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_offset_minutes(0).await
    }

    /// Seeds resident "rita" at "Tower A, 12", guard "gus" and admin "ada".
    pub async fn with_offset_minutes(minutes: i32) -> Self {
        let store = MemoryStore::new();
        let users: Arc<dyn UserStore> = Arc::new(store.clone());
        let profiles: Arc<dyn ProfileStore> = Arc::new(store.clone());
        let visits: Arc<dyn VisitStore> = Arc::new(store.clone());

        let visits_config = VisitsConfig {
            utc_offset_minutes: minutes,
            ..VisitsConfig::default()
        };
        let auth_config = AuthConfig {
            jwt_secret: "fixture-secret".into(),
            ..AuthConfig::default()
        };

        let auth = Arc::new(AuthManager::new(
            users.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&auth_config)),
            Arc::new(JwtEncoder::new(&auth_config)),
            Arc::new(JwtDecoder::new(&auth_config)),
        ));
        let resolver = Arc::new(CallerResolver::new(users.clone(), profiles.clone()));
        let enricher = Arc::new(VisitEnricher::new(
            visits.clone(),
            users.clone(),
            profiles.clone(),
        ));
        let offset = visits_config.local_offset().unwrap();

        let lifecycle = VisitLifecycleService::new(
            resolver.clone(),
            visits.clone(),
            enricher.clone(),
            &visits_config,
        )
        .unwrap();
        let query = QueryService::new(
            resolver.clone(),
            profiles.clone(),
            visits.clone(),
            enricher.clone(),
            offset,
        );
        let qr = QrVerificationService::new(resolver.clone(), visits.clone(), enricher.clone());
        let provisioning = ProvisioningService::new(users, profiles.clone(), auth);

        let rita = provisioning
            .create_user(NewAccount {
                name: "Rita".into(),
                username: "rita".into(),
                role: UserRole::Resident,
                password: None,
                phone: Some("555-0101".into()),
            })
            .await
            .unwrap();
        let resident = store.find_resident_by_user(rita.id).await.unwrap().unwrap();
        let home = provisioning
            .create_residence("Tower A, 12", None)
            .await
            .unwrap();
        provisioning
            .assign_residence(resident.id, home.id)
            .await
            .unwrap();

        let gus = provisioning
            .create_user(NewAccount {
                name: "Gus".into(),
                username: "gus".into(),
                role: UserRole::Guard,
                password: None,
                phone: None,
            })
            .await
            .unwrap();
        let guard = store.find_guard_by_user(gus.id).await.unwrap().unwrap();

        let ada = provisioning
            .create_user(NewAccount {
                name: "Ada".into(),
                username: "ada".into(),
                role: UserRole::Admin,
                password: None,
                phone: None,
            })
            .await
            .unwrap();

        Self {
            store,
            resolver,
            enricher,
            lifecycle,
            query,
            qr,
            provisioning,
            resident_user: rita.id,
            resident,
            guard_user: gus.id,
            guard,
            admin_user: ada.id,
        }
    }

    pub fn resident_ctx(&self) -> RequestContext {
        RequestContext::new(self.resident_user)
    }

    pub fn guard_ctx(&self) -> RequestContext {
        RequestContext::new(self.guard_user)
    }

    pub fn admin_ctx(&self) -> RequestContext {
        RequestContext::new(self.admin_user)
    }

    /// A RESIDENT account with no resident profile row.
    pub async fn orphan_resident(&self) -> UserId {
        self.store
            .create_user(
                &CreateUser {
                    name: "Orphan".into(),
                    username: format!("orphan-{}", UserId::new()),
                    role: UserRole::Resident,
                    password_hash: None,
                },
                NewProfile::None,
            )
            .await
            .unwrap()
            .id
    }

    /// Another resident, without a residence.
    pub async fn second_resident(&self) -> (RequestContext, Resident) {
        let user = self
            .provisioning
            .create_user(NewAccount {
                name: "Nina".into(),
                username: "nina".into(),
                role: UserRole::Resident,
                password: None,
                phone: Some("555-0102".into()),
            })
            .await
            .unwrap();
        let resident = self
            .store
            .find_resident_by_user(user.id)
            .await
            .unwrap()
            .unwrap();
        (RequestContext::new(user.id), resident)
    }

    /// Request a visit as the seeded resident.
    pub async fn request(&self, visitor_name: &str, date: &str) -> Visit {
        self.lifecycle
            .request_visit(
                &self.resident_ctx(),
                VisitRequest {
                    visitor_name: visitor_name.into(),
                    date: date.into(),
                    additional_info: None,
                },
            )
            .await
            .unwrap()
    }

    /// Register a visit at the gate as the seeded guard.
    pub async fn register(&self, visit: &Visit) -> Visit {
        let code = self.code_of(visit).await;
        self.lifecycle
            .register_visit(&self.guard_ctx(), &code)
            .await
            .unwrap()
    }

    pub async fn code_of(&self, visit: &Visit) -> String {
        let qr_id = visit.qr_id.unwrap();
        self.store.find_qr(qr_id).await.unwrap().unwrap().code
    }

    pub async fn state_of(&self, visit: &Visit) -> VisitState {
        self.store.find_visit(visit.id).await.unwrap().unwrap().state
    }
}
