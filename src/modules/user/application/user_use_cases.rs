use std::sync::Arc;

use crate::auth::application::ports::outgoing::{PasswordHasher, SessionRepository};
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::user::application::ports::incoming::use_cases::{
    ChangePasswordUseCase, CreateUserUseCase, GetUserUseCase, HardDeleteUserUseCase,
    ListUsersUseCase, RestoreUserUseCase, SoftDeleteUserUseCase, UpdateUserUseCase,
};
use crate::user::application::ports::outgoing::UserRepository;
use crate::user::application::services::{
    ChangePasswordService, CreateUserService, GetUserService, HardDeleteUserService,
    ListUsersService, RestoreUserService, SoftDeleteUserService, UpdateUserService,
};

#[derive(Clone)]
pub struct UserUseCases {
    pub create: Arc<dyn CreateUserUseCase + Send + Sync>,
    pub get: Arc<dyn GetUserUseCase + Send + Sync>,
    pub list: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateUserUseCase + Send + Sync>,
    pub change_password: Arc<dyn ChangePasswordUseCase + Send + Sync>,
    pub soft_delete: Arc<dyn SoftDeleteUserUseCase + Send + Sync>,
    pub restore: Arc<dyn RestoreUserUseCase + Send + Sync>,
    pub hard_delete: Arc<dyn HardDeleteUserUseCase + Send + Sync>,
}

impl UserUseCases {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create: Arc::new(CreateUserService::new(users.clone(), hasher.clone(), notifier)),
            get: Arc::new(GetUserService::new(users.clone())),
            list: Arc::new(ListUsersService::new(users.clone())),
            update: Arc::new(UpdateUserService::new(users.clone())),
            change_password: Arc::new(ChangePasswordService::new(users.clone(), hasher)),
            soft_delete: Arc::new(SoftDeleteUserService::new(users.clone(), sessions)),
            restore: Arc::new(RestoreUserService::new(users.clone())),
            hard_delete: Arc::new(HardDeleteUserService::new(users)),
        }
    }
}
