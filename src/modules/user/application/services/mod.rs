mod change_password_service;
mod create_user_service;
mod delete_user_service;
mod get_user_service;
mod list_users_service;
mod update_user_service;

pub use change_password_service::ChangePasswordService;
pub use create_user_service::CreateUserService;
pub use delete_user_service::{HardDeleteUserService, RestoreUserService, SoftDeleteUserService};
pub use get_user_service::GetUserService;
pub use list_users_service::ListUsersService;
pub use update_user_service::UpdateUserService;
