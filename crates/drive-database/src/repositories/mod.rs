//! Repository implementations, one per aggregate.

pub mod file;
pub mod folder;
pub mod link_share;
pub mod recent;
pub mod share;
pub mod star;
pub mod user;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use link_share::LinkShareRepository;
pub use recent::RecentRepository;
pub use share::ShareRepository;
pub use star::StarRepository;
pub use user::UserRepository;
