mod delete_file;
mod get_file;
mod upload_file;

// `__path_*` items are generated by `#[utoipa::path]` and read by `ApiDoc`.
pub use delete_file::{__path_delete_file_handler, delete_file_handler};
pub use get_file::{__path_get_file_handler, get_file_handler};
pub use upload_file::{__path_upload_file_handler, UploadQuery, upload_file_handler};
