// file: src/client/mod.rs
// description: GitHub commit API client module exports
// reference: internal module structure

pub mod github;
pub mod pacer;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use github::GithubClient;
pub use pacer::{RequestPacer, Sleeper, TokioSleeper};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
