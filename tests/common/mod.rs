#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;

use member_api::{
    config::Config,
    crypto::{identity::IdentityCodec, password::Argon2CredentialHasher},
    entities::{departments, event_levels, images, roles, users},
    repo::{
        departments::DepartmentsRepo,
        event_levels::EventLevelsRepo,
        images::ImagesRepo,
        roles::RolesRepo,
        users::{DepartmentView, EventLevelView, NewUser, ProfilePatch, UserView, UsersRepo},
    },
    service::{
        config::ConfigServiceImpl,
        departments::DepartmentServiceImpl,
        event_levels::EventLevelServiceImpl,
        images::ImageServiceImpl,
        roles::RoleServiceImpl,
        users::{UserService, UserServiceImpl},
    },
    state::AppState,
};

/// Single in-memory backing store shared by all the repo doubles, so the
/// suites can exercise the full service stack without a database.
pub struct MemStore {
    inner: Mutex<Inner>,
}

struct Inner {
    users: Vec<users::Model>,
    departments: HashMap<String, departments::Model>,
    roles: HashMap<String, roles::Model>,
    event_levels: HashMap<String, event_levels::Model>,
    images: HashMap<i64, images::Model>,
    next_user_no: i64,
    next_image_no: i64,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                users: Vec::new(),
                departments: HashMap::new(),
                roles: HashMap::new(),
                event_levels: HashMap::new(),
                images: HashMap::new(),
                next_user_no: 1,
                next_image_no: 1,
            }),
        })
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn image_count(&self) -> usize {
        self.inner.lock().unwrap().images.len()
    }

    /// Most recent row for the email regardless of lifecycle state.
    pub fn raw_user(&self, email: &str) -> Option<users::Model> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .filter(|u| u.user_email == email)
            .last()
            .cloned()
    }

    pub fn active_user(&self, email: &str) -> Option<users::Model> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.user_email == email && u.withdrawal_at.is_none())
            .cloned()
    }

    fn compose_view(inner: &Inner, user: &users::Model) -> Result<UserView, sea_orm::DbErr> {
        let department = inner.departments.get(&user.department_id).ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound(format!("department {}", user.department_id))
        })?;
        let event_level = inner.event_levels.get(&user.event_level_name).ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound(format!("event level {}", user.event_level_name))
        })?;

        Ok(UserView {
            user_no: user.user_no,
            user_name: user.user_name.clone(),
            user_email: user.user_email.clone(),
            user_phone: user.user_phone.clone(),
            role_id: user.role_id.clone(),
            department: DepartmentView {
                department_id: department.department_id.clone(),
                department_name: department.department_name.clone(),
            },
            event_level: EventLevelView {
                event_level_name: event_level.event_level_name.clone(),
                event_level_details: event_level.event_level_details.clone(),
                priority: event_level.priority,
            },
        })
    }
}

pub struct MemUsersRepo(pub Arc<MemStore>);

#[async_trait]
impl UsersRepo for MemUsersRepo {
    async fn exists_active_by_email(&self, email: &str) -> Result<bool, sea_orm::DbErr> {
        Ok(self.0.active_user(email).is_some())
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<users::Model>, sea_orm::DbErr> {
        Ok(self.0.active_user(email))
    }

    async fn find_view_by_email(&self, email: &str) -> Result<Option<UserView>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let Some(user) = inner
            .users
            .iter()
            .find(|u| u.user_email == email && u.withdrawal_at.is_none())
        else {
            return Ok(None);
        };
        MemStore::compose_view(&inner, user).map(Some)
    }

    async fn insert(&self, new_user: NewUser) -> Result<users::Model, sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        let now = Utc::now();
        let model = users::Model {
            user_no: inner.next_user_no,
            user_name: new_user.user_name,
            user_email: new_user.user_email,
            user_password: new_user.password_hash,
            user_phone: new_user.user_phone,
            is_socialed: new_user.is_socialed,
            role_id: new_user.role_id,
            department_id: new_user.department_id,
            event_level_name: new_user.event_level_name,
            image_no: None,
            created_at: now.into(),
            updated_at: now.into(),
            withdrawal_at: None,
        };
        inner.next_user_no += 1;
        inner.users.push(model.clone());
        Ok(model)
    }

    async fn update_profile(
        &self,
        user_no: i64,
        patch: ProfilePatch,
    ) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.user_name = patch.user_name;
            user.user_phone = patch.user_phone;
            user.department_id = patch.department_id;
            user.event_level_name = patch.event_level_name;
            user.updated_at = Utc::now().into();
        }
        Ok(())
    }

    async fn update_password(
        &self,
        user_no: i64,
        password_hash: &str,
    ) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.user_password = password_hash.to_string();
            user.updated_at = Utc::now().into();
        }
        Ok(())
    }

    async fn update_role(&self, user_no: i64, role_id: &str) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.role_id = role_id.to_string();
            user.updated_at = Utc::now().into();
        }
        Ok(())
    }

    async fn mark_withdrawn(&self, user_no: i64) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        let now = Utc::now();
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.withdrawal_at = Some(now.into());
            user.updated_at = now.into();
        }
        Ok(())
    }

    async fn list_views(&self, offset: u64, limit: u64) -> Result<Vec<UserView>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let mut active: Vec<&users::Model> = inner
            .users
            .iter()
            .filter(|u| u.withdrawal_at.is_none())
            .collect();
        active.sort_by_key(|u| u.user_no);
        active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|u| MemStore::compose_view(&inner, u))
            .collect()
    }

    async fn list_views_by_department(
        &self,
        department_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<UserView>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let mut active: Vec<&users::Model> = inner
            .users
            .iter()
            .filter(|u| u.withdrawal_at.is_none() && u.department_id == department_id)
            .collect();
        active.sort_by_key(|u| u.user_no);
        active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|u| MemStore::compose_view(&inner, u))
            .collect()
    }

    async fn count_active_by_role(&self, role_id: &str) -> Result<u64, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.withdrawal_at.is_none() && u.role_id == role_id)
            .count() as u64)
    }

    async fn count_active_by_department(
        &self,
        department_id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.withdrawal_at.is_none() && u.department_id == department_id)
            .count() as u64)
    }

    async fn count_active_by_event_level(
        &self,
        event_level_name: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.withdrawal_at.is_none() && u.event_level_name == event_level_name)
            .count() as u64)
    }
}

pub struct MemImagesRepo(pub Arc<MemStore>);

#[async_trait]
impl ImagesRepo for MemImagesRepo {
    async fn find_by_image_no(
        &self,
        image_no: i64,
    ) -> Result<Option<images::Model>, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().images.get(&image_no).cloned())
    }

    async fn attach(
        &self,
        user_no: i64,
        image_path: &str,
    ) -> Result<images::Model, sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        let image = images::Model {
            image_no: inner.next_image_no,
            image_path: image_path.to_string(),
        };
        inner.next_image_no += 1;
        inner.images.insert(image.image_no, image.clone());
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.image_no = Some(image.image_no);
            user.updated_at = Utc::now().into();
        }
        Ok(image)
    }

    async fn update_path(&self, image_no: i64, image_path: &str) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(image) = inner.images.get_mut(&image_no) {
            image.image_path = image_path.to_string();
        }
        Ok(())
    }

    async fn detach(&self, user_no: i64, image_no: i64) -> Result<(), sea_orm::DbErr> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.user_no == user_no && u.withdrawal_at.is_none())
        {
            user.image_no = None;
            user.updated_at = Utc::now().into();
        }
        inner.images.remove(&image_no);
        Ok(())
    }
}

pub struct MemDepartmentsRepo(pub Arc<MemStore>);

#[async_trait]
impl DepartmentsRepo for MemDepartmentsRepo {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().departments.contains_key(id))
    }

    async fn find(&self, id: &str) -> Result<Option<departments::Model>, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().departments.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<departments::Model>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let mut rows: Vec<_> = inner.departments.values().cloned().collect();
        rows.sort_by(|a, b| a.department_id.cmp(&b.department_id));
        Ok(rows)
    }

    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().departments.insert(
            id.to_string(),
            departments::Model {
                department_id: id.to_string(),
                department_name: name.to_string(),
                main_dashboard_uid: None,
                main_dashboard_title: None,
            },
        );
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        if let Some(row) = self.0.inner.lock().unwrap().departments.get_mut(id) {
            row.department_name = name.to_string();
        }
        Ok(())
    }

    async fn update_dashboard(
        &self,
        id: &str,
        dashboard_uid: &str,
        dashboard_title: &str,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(row) = self.0.inner.lock().unwrap().departments.get_mut(id) {
            row.main_dashboard_uid = Some(dashboard_uid.to_string());
            row.main_dashboard_title = Some(dashboard_title.to_string());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().departments.remove(id);
        Ok(())
    }
}

pub struct MemRolesRepo(pub Arc<MemStore>);

#[async_trait]
impl RolesRepo for MemRolesRepo {
    async fn exists(&self, id: &str) -> Result<bool, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().roles.contains_key(id))
    }

    async fn find(&self, id: &str) -> Result<Option<roles::Model>, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().roles.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let mut rows: Vec<_> = inner.roles.values().cloned().collect();
        rows.sort_by(|a, b| a.role_id.cmp(&b.role_id));
        Ok(rows)
    }

    async fn insert(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().roles.insert(
            id.to_string(),
            roles::Model {
                role_id: id.to_string(),
                role_name: name.to_string(),
            },
        );
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), sea_orm::DbErr> {
        if let Some(row) = self.0.inner.lock().unwrap().roles.get_mut(id) {
            row.role_name = name.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().roles.remove(id);
        Ok(())
    }
}

pub struct MemEventLevelsRepo(pub Arc<MemStore>);

#[async_trait]
impl EventLevelsRepo for MemEventLevelsRepo {
    async fn exists(&self, name: &str) -> Result<bool, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().event_levels.contains_key(name))
    }

    async fn find(&self, name: &str) -> Result<Option<event_levels::Model>, sea_orm::DbErr> {
        Ok(self.0.inner.lock().unwrap().event_levels.get(name).cloned())
    }

    async fn list(&self) -> Result<Vec<event_levels::Model>, sea_orm::DbErr> {
        let inner = self.0.inner.lock().unwrap();
        let mut rows: Vec<_> = inner.event_levels.values().cloned().collect();
        rows.sort_by_key(|r| r.priority);
        Ok(rows)
    }

    async fn insert(
        &self,
        name: &str,
        details: &str,
        priority: i32,
    ) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().event_levels.insert(
            name.to_string(),
            event_levels::Model {
                event_level_name: name.to_string(),
                event_level_details: details.to_string(),
                priority,
            },
        );
        Ok(())
    }

    async fn update(
        &self,
        name: &str,
        details: &str,
        priority: i32,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(row) = self.0.inner.lock().unwrap().event_levels.get_mut(name) {
            row.event_level_details = details.to_string();
            row.priority = priority;
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), sea_orm::DbErr> {
        self.0.inner.lock().unwrap().event_levels.remove(name);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        identity_secret_key: "integration-test-secret".to_string(),
        default_role_id: "ROLE_MEMBER".to_string(),
        default_event_level: "INFO".to_string(),
        admin_role_id: "ROLE_ADMIN".to_string(),
        page_size: 10,
    }
}

pub struct Harness {
    pub store: Arc<MemStore>,
    pub state: Arc<AppState>,
}

impl Harness {
    /// Full service stack over the in-memory store, with the reference
    /// records registration depends on already seeded.
    pub async fn new() -> Self {
        Self::build(|users| users).await
    }

    /// Same stack, with a hook to wrap the user service (instrumented
    /// implementations and the like).
    pub async fn build(
        decorate_users: impl FnOnce(Arc<dyn UserService>) -> Arc<dyn UserService>,
    ) -> Self {
        let store = MemStore::new();

        let users_repo = Arc::new(MemUsersRepo(store.clone()));
        let images_repo = Arc::new(MemImagesRepo(store.clone()));
        let departments_repo = Arc::new(MemDepartmentsRepo(store.clone()));
        let roles_repo = Arc::new(MemRolesRepo(store.clone()));
        let event_levels_repo = Arc::new(MemEventLevelsRepo(store.clone()));

        roles_repo.insert("ROLE_MEMBER", "Member").await.unwrap();
        roles_repo.insert("ROLE_ADMIN", "Administrator").await.unwrap();
        departments_repo.insert("DEP001", "Facilities").await.unwrap();
        event_levels_repo.insert("INFO", "Informational", 1).await.unwrap();

        let config = test_config();
        let codec = Arc::new(IdentityCodec::new(&config.identity_secret_key));
        let hasher = Arc::new(Argon2CredentialHasher);

        let users: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(
            users_repo.clone(),
            roles_repo.clone(),
            departments_repo.clone(),
            event_levels_repo.clone(),
            hasher,
            config.default_role_id.clone(),
            config.default_event_level.clone(),
        ));
        let users = decorate_users(users);
        let images = Arc::new(ImageServiceImpl::new(users_repo.clone(), images_repo));
        let departments = Arc::new(DepartmentServiceImpl::new(
            departments_repo,
            users_repo.clone(),
        ));
        let roles = Arc::new(RoleServiceImpl::new(roles_repo, users_repo.clone()));
        let event_levels = Arc::new(EventLevelServiceImpl::new(event_levels_repo, users_repo));

        let state = AppState::from_parts(
            Arc::new(ConfigServiceImpl::from_config(config)),
            codec,
            users,
            images,
            departments,
            roles,
            event_levels,
        );

        Self { store, state }
    }

    pub fn token_for(&self, email: &str) -> String {
        self.state.codec().encrypt(email).unwrap()
    }
}
