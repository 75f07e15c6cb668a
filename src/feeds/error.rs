use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("undecodable response: {0}")]
    Decode(#[from] std::io::Error),
    #[error("malformed record {name}: {message}")]
    Malformed { name: String, message: String },
    #[error("fetch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
