//! gRPC transport for the university registry: service adapter, typed
//! client, server runtime and configuration.

pub mod client;
pub mod config;
mod convert;
mod error;
mod runtime;
pub mod service;

/// Generated protobuf types and stubs for `university.v1.UniversityService`.
pub mod proto {
    tonic::include_proto!("university.v1");
}

pub use client::UniversityClient;
pub use config::ServerConfig;
pub use error::{registry_status, ClientError, ServerError};
pub use runtime::{init_tracing, load_registry, run, serve, start_blocking};
pub use service::UniversityGrpcService;

/// Fully-qualified service name, as registered on the wire.
pub const SERVICE_NAME: &str = "university.v1.UniversityService";
