use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    crypto::{identity::IdentityCodec, password::Argon2CredentialHasher},
    service::{
        config::{ConfigService, ConfigServiceImpl},
        departments::{DepartmentService, DepartmentServiceImpl},
        event_levels::{EventLevelService, EventLevelServiceImpl},
        images::{ImageService, ImageServiceImpl},
        roles::{RoleService, RoleServiceImpl},
        users::{UserService, UserServiceImpl},
    },
};

pub trait DatabaseClient: Send + Sync {
    fn conn(&self) -> &DatabaseConnection;
}

pub struct SeaOrmDatabaseClient {
    conn: DatabaseConnection,
}

impl SeaOrmDatabaseClient {
    pub async fn new() -> Self {
        let conn = crate::db::connect()
            .await
            .expect("database connection failed");
        crate::schema::apply(&conn)
            .await
            .expect("schema apply failed");
        Self { conn }
    }
}

impl DatabaseClient for SeaOrmDatabaseClient {
    fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }
}

pub struct AppState {
    config: Arc<dyn ConfigService>,
    codec: Arc<IdentityCodec>,
    users: Arc<dyn UserService>,
    images: Arc<dyn ImageService>,
    departments: Arc<dyn DepartmentService>,
    roles: Arc<dyn RoleService>,
    event_levels: Arc<dyn EventLevelService>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config: Arc<dyn ConfigService> = Arc::new(ConfigServiceImpl::new());
        let db = Arc::new(SeaOrmDatabaseClient::new().await);

        let users_repo = Arc::new(crate::repo::users::SeaOrmUsersRepo::new(db.clone()));
        let images_repo = Arc::new(crate::repo::images::SeaOrmImagesRepo::new(db.clone()));
        let departments_repo =
            Arc::new(crate::repo::departments::SeaOrmDepartmentsRepo::new(db.clone()));
        let roles_repo = Arc::new(crate::repo::roles::SeaOrmRolesRepo::new(db.clone()));
        let event_levels_repo =
            Arc::new(crate::repo::event_levels::SeaOrmEventLevelsRepo::new(db.clone()));

        let values = config.values().clone();
        let codec = Arc::new(IdentityCodec::new(&values.identity_secret_key));
        let hasher = Arc::new(Argon2CredentialHasher);

        let users = Arc::new(UserServiceImpl::new(
            users_repo.clone(),
            roles_repo.clone(),
            departments_repo.clone(),
            event_levels_repo.clone(),
            hasher,
            values.default_role_id.clone(),
            values.default_event_level.clone(),
        ));
        let images = Arc::new(ImageServiceImpl::new(users_repo.clone(), images_repo));
        let departments = Arc::new(DepartmentServiceImpl::new(
            departments_repo,
            users_repo.clone(),
        ));
        let roles = Arc::new(RoleServiceImpl::new(roles_repo, users_repo.clone()));
        let event_levels = Arc::new(EventLevelServiceImpl::new(event_levels_repo, users_repo));

        Self::from_parts(config, codec, users, images, departments, roles, event_levels)
    }

    /// Assembles a state from pre-built collaborators; the production path
    /// and the test suites share this constructor.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        config: Arc<dyn ConfigService>,
        codec: Arc<IdentityCodec>,
        users: Arc<dyn UserService>,
        images: Arc<dyn ImageService>,
        departments: Arc<dyn DepartmentService>,
        roles: Arc<dyn RoleService>,
        event_levels: Arc<dyn EventLevelService>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            codec,
            users,
            images,
            departments,
            roles,
            event_levels,
        })
    }

    pub fn config(&self) -> &dyn ConfigService {
        self.config.as_ref()
    }

    pub fn codec(&self) -> &IdentityCodec {
        self.codec.as_ref()
    }

    pub fn users(&self) -> &dyn UserService {
        self.users.as_ref()
    }

    pub fn images(&self) -> &dyn ImageService {
        self.images.as_ref()
    }

    pub fn departments(&self) -> &dyn DepartmentService {
        self.departments.as_ref()
    }

    pub fn roles(&self) -> &dyn RoleService {
        self.roles.as_ref()
    }

    pub fn event_levels(&self) -> &dyn EventLevelService {
        self.event_levels.as_ref()
    }
}
