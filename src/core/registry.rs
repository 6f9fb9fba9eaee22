//! Component registry
//!
//! A small service locator holding exactly one `Arc<T>` per component.
//! Infrastructure handles (`Database`, `RedisClient`) are registered by hand
//! at startup with [`ServiceLocator::set`]; repositories and services
//! are declared with the `#[repository]` and `#[service]` attributes from
//! `singleton_macro`, which generate `instance()` and submit an `inventory`
//! registration next to the type:
//!
//! ```rust,ignore
//! #[repository(name = "contact", collection = "contacts")]
//! pub struct ContactRepository {
//!     db: Arc<Database>,
//! }
//! ```
//!
//! Lookups are keyed by the snake_case form of the type name, so
//! `ServiceLocator::get::<ContactRepository>()` resolves the registration
//! named `contact_repository`.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};
use crate::utils::string_utils::to_snake_case;

/// Common interface of business services.
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Common interface of data access repositories.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// MongoDB collection backing this repository.
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub type Constructor = fn() -> Box<dyn Any + Send + Sync>;

pub struct ServiceRegistration {
    pub name: &'static str,
    /// Must return `Box<Arc<Self>>`.
    pub constructor: Constructor,
}

pub struct RepositoryRegistration {
    pub name: &'static str,
    /// Must return `Box<Arc<Self>>`.
    pub constructor: Constructor,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static CONSTRUCTORS: Lazy<HashMap<&'static str, Constructor>> = Lazy::new(|| {
    let mut constructors = HashMap::new();

    for registration in inventory::iter::<RepositoryRegistration>() {
        constructors.insert(registration.name, registration.constructor);
    }
    for registration in inventory::iter::<ServiceRegistration>() {
        constructors.insert(registration.name, registration.constructor);
    }

    constructors
});

pub struct ServiceLocator {
    /// Each value wraps an `Arc<T>`; keyed by the snake_case type name.
    instances: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
    /// Components currently being constructed, for cycle detection.
    initializing: RwLock<HashSet<String>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// Registry key for `T`: `crate::db::Database` → `database`.
    pub fn key_of<T: 'static>() -> String {
        let type_name = std::any::type_name::<T>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        to_snake_case(short)
    }

    /// Returns the shared instance of `T`, constructing it on first use.
    ///
    /// # Panics
    ///
    /// When `T` was neither registered with [`ServiceLocator::set`] nor
    /// submitted as a repository/service registration, or when construction
    /// recurses into itself. Both are wiring mistakes caught at startup by
    /// [`ServiceLocator::initialize_all`].
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Some(instance) => instance,
            None => panic!(
                "Component not found: {}. Register it with ServiceLocator::set() or submit a registration",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Like [`ServiceLocator::get`] but returns `None` for unknown components.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let key = Self::key_of::<T>();

        if let Some(instance) = Self::cached::<T>(&key) {
            return Some(instance);
        }

        let constructor = *CONSTRUCTORS.get(key.as_str())?;

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(key.clone()) {
                panic!("Circular dependency detected: {} is already being constructed", key);
            }
        }

        // Dependencies are resolved inside the constructor, so no lock is held here.
        let boxed = constructor();

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&key);

        let instance: Arc<dyn Any + Send + Sync> = Arc::from(boxed);
        if instance.downcast_ref::<Arc<T>>().is_none() {
            panic!("Type mismatch for component registration: {}", key);
        }

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let stored = instances.entry(key).or_insert(instance);
        stored.downcast_ref::<Arc<T>>().cloned()
    }

    fn cached<T: 'static + Send + Sync>(key: &str) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(key)
            .and_then(|instance| instance.downcast_ref::<Arc<T>>().cloned())
    }

    /// Registers an externally created instance, replacing any previous one.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let key = Self::key_of::<T>();
        log::info!("📦 Registering: {}", key);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(key, Arc::new(instance) as Arc<dyn Any + Send + Sync>);
    }

    /// Constructs every registered component up front.
    ///
    /// Repositories go first so services resolve already built data access.
    /// Index creation is not part of this; see
    /// [`create_indexes`](crate::repositories::create_indexes).
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING COMPONENTS");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        print_step_start(1, "Creating repositories");
        for registration in &repositories {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(1, "Repositories created", repositories.len());

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        print_step_start(2, "Creating services");
        for registration in &services {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(2, "Services created", services.len());

        print_final_summary(repositories.len(), services.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SiteBanner {
        text: &'static str,
    }

    struct HolidayNoticeService;

    impl HolidayNoticeService {
        fn construct() -> Box<dyn Any + Send + Sync> {
            Box::new(Arc::new(HolidayNoticeService))
        }
    }

    inventory::submit! {
        ServiceRegistration {
            name: "holiday_notice_service",
            constructor: HolidayNoticeService::construct,
        }
    }

    #[test]
    fn test_key_of_uses_snake_case_type_name() {
        assert_eq!(ServiceLocator::key_of::<SiteBanner>(), "site_banner");
        assert_eq!(ServiceLocator::key_of::<HolidayNoticeService>(), "holiday_notice_service");
    }

    #[test]
    fn test_set_and_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(SiteBanner { text: "Free estimates" }));

        let first = ServiceLocator::get::<SiteBanner>();
        let second = ServiceLocator::get::<SiteBanner>();

        assert_eq!(first.text, "Free estimates");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registered_component_is_built_lazily_once() {
        let first = ServiceLocator::get::<HolidayNoticeService>();
        let second = ServiceLocator::get::<HolidayNoticeService>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_attribute_registrations_match_locator_keys() {
        use crate::repositories::{
            analytics::ThumbprintRepository, contacts::ContactRepository, faqs::FaqRepository,
            reviews::ReviewRepository, users::UserRepository,
        };
        use crate::services::{
            analytics::AnalyticsService, auth::{LoginThrottleService, TokenService},
            contacts::ContactService, faqs::FaqService, notifications::NotificationService,
            reviews::ReviewService, site::SiteService, users::UserService,
        };

        let repositories: Vec<&str> = inventory::iter::<RepositoryRegistration>()
            .map(|r| r.name)
            .collect();
        for key in [
            ServiceLocator::key_of::<UserRepository>(),
            ServiceLocator::key_of::<ContactRepository>(),
            ServiceLocator::key_of::<ReviewRepository>(),
            ServiceLocator::key_of::<FaqRepository>(),
            ServiceLocator::key_of::<ThumbprintRepository>(),
        ] {
            assert!(repositories.contains(&key.as_str()), "no registration for {}", key);
        }

        let services: Vec<&str> = inventory::iter::<ServiceRegistration>()
            .map(|r| r.name)
            .collect();
        for key in [
            ServiceLocator::key_of::<UserService>(),
            ServiceLocator::key_of::<TokenService>(),
            ServiceLocator::key_of::<LoginThrottleService>(),
            ServiceLocator::key_of::<ContactService>(),
            ServiceLocator::key_of::<ReviewService>(),
            ServiceLocator::key_of::<FaqService>(),
            ServiceLocator::key_of::<AnalyticsService>(),
            ServiceLocator::key_of::<NotificationService>(),
            ServiceLocator::key_of::<SiteService>(),
        ] {
            assert!(services.contains(&key.as_str()), "no registration for {}", key);
        }
    }

    #[test]
    fn test_locator_and_instance_share_one_singleton() {
        use crate::services::site::SiteService;

        let located = ServiceLocator::get::<SiteService>();
        assert!(Arc::ptr_eq(&located, &SiteService::instance()));
    }

    #[test]
    fn test_unknown_component_is_none() {
        struct NeverRegistered;
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_none());
    }
}
