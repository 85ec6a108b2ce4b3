mod delete_file;
mod read_file;
mod upload_file;

pub use delete_file::{DeleteFileError, DeleteFileUseCase};
pub use read_file::{ReadFileError, ReadFileUseCase};
pub use upload_file::{UploadFileCommand, UploadFileError, UploadFileUseCase};
