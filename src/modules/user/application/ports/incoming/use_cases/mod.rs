mod change_password;
mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod update_user;
mod user_view;

pub use change_password::{ChangePasswordCommand, ChangePasswordError, ChangePasswordUseCase};
pub use create_user::{CreateUserCommand, CreateUserError, CreateUserInput, CreateUserUseCase};
pub use delete_user::{
    HardDeleteUserError, HardDeleteUserUseCase, RestoreUserError, RestoreUserUseCase,
    SoftDeleteUserError, SoftDeleteUserUseCase,
};
pub use get_user::{GetUserError, GetUserUseCase};
pub use list_users::{ListUsersError, ListUsersUseCase};
pub use update_user::{
    UpdateUserCommand, UpdateUserCommandError, UpdateUserError, UpdateUserUseCase,
};
pub use user_view::UserView;
