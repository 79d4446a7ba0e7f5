pub mod downloader;
pub mod request;
pub mod snapshot;

pub use downloader::ModelDownloader;
pub use request::DownloadRequest;
pub use snapshot::{HubSnapshot, SnapshotSource};
