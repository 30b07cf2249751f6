pub mod archive_service;
pub mod fetch_service;

pub use archive_service::ArchiveService;
pub use fetch_service::FetchService;
