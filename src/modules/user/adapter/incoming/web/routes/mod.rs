mod change_password;
mod create_user;
mod delete_user;
mod get_user;
mod get_users;
mod update_user;

// `__path_*` items are generated by `#[utoipa::path]` and read by `ApiDoc`.
pub use change_password::{
    __path_change_password_handler, ChangePasswordRequestDto, change_password_handler,
};
pub use create_user::{__path_create_user_handler, CreateUserRequestDto, create_user_handler};
pub use delete_user::{
    __path_hard_delete_user_handler, __path_restore_user_handler, __path_soft_delete_user_handler,
    hard_delete_user_handler, restore_user_handler, soft_delete_user_handler,
};
pub use get_user::{
    __path_get_me_handler, __path_get_user_handler, get_me_handler, get_user_handler,
};
pub use get_users::{__path_get_users_handler, GetUsersQuery, get_users_handler};
pub use update_user::{__path_update_user_handler, UpdateUserRequestDto, update_user_handler};
