pub mod course;
pub mod demo;
pub mod enroll;
pub mod export;
pub mod output;
pub mod serve;
pub mod student;

use std::future::Future;

use anyhow::{Context, Result};
use university_server::UniversityClient;

/// Run one client future to completion on a fresh current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

pub(crate) async fn connect(server: &str) -> Result<UniversityClient> {
    UniversityClient::connect(server).await.with_context(|| {
        format!("cannot reach university server at {server}; start one with `university serve`")
    })
}
