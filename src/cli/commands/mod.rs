pub mod authorize;
pub mod create;
pub mod list_files;
pub mod share;

pub use authorize::authorize_command;
pub use create::create_command;
pub use list_files::list_files_command;
pub use share::share_command;
