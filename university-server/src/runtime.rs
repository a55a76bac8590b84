use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use university_core::{roster, Registry};

use crate::config::ServerConfig;
use crate::error::{io_err, ServerError};
use crate::service::UniversityGrpcService;

/// Start the server and block the current thread until it exits.
pub fn start_blocking(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config))
}

/// Build the registry, bind the listen address and serve until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let registry = Arc::new(load_registry(&config)?);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|e| io_err(config.listen_addr.to_string(), e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| io_err(config.listen_addr.to_string(), e))?;
    tracing::info!(addr = %local_addr, "university gRPC server listening");

    serve(registry, listener, shutdown_signal()).await
}

/// Serve `registry` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    registry: Arc<Registry>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(UniversityGrpcService::new(registry).into_server())
        .serve_with_incoming_shutdown(incoming, shutdown)
        .await?;
    tracing::info!("university gRPC server stopped");
    Ok(())
}

/// Empty registry, or one seeded from `config.seed`.
pub fn load_registry(config: &ServerConfig) -> Result<Registry, ServerError> {
    let Some(path) = config.seed.as_deref() else {
        return Ok(Registry::new());
    };
    let roster = roster::load_roster_at(path)?;
    let registry = Registry::from_roster(&roster)?;
    let stats = registry.stats()?;
    tracing::info!(
        seed = %path.display(),
        students = stats.students,
        courses = stats.courses,
        enrollments = stats.enrollments,
        "registry seeded"
    );
    Ok(registry)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl-c, shutting down server"),
        Err(err) => {
            tracing::error!(error = %err, "ctrl-c handler failed; server will run until killed");
            std::future::pending::<()>().await;
        }
    }
}

pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use university_core::{CourseCode, ErrorKind, RegistryError};

    #[test]
    fn no_seed_gives_empty_registry() {
        let registry = load_registry(&ServerConfig::default()).expect("registry");
        assert_eq!(registry.stats().expect("stats").students, 0);
    }

    #[test]
    fn seed_file_is_applied() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("seed.yaml");
        fs::write(
            &path,
            "courses:\n  - code: SIS-103\n    title: Programming\n    instructor: Dr. R\n",
        )
        .expect("write");
        let config = ServerConfig {
            seed: Some(path),
            ..ServerConfig::default()
        };

        let registry = load_registry(&config).expect("registry");
        let course = registry
            .get_course(&CourseCode::from("SIS-103"))
            .expect("course");
        assert_eq!(course.title, "Programming");
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let config = ServerConfig {
            seed: Some(dir.path().join("absent.yaml")),
            ..ServerConfig::default()
        };
        let err = load_registry(&config).unwrap_err();
        match err {
            ServerError::Registry(inner @ RegistryError::RosterNotFound { .. }) => {
                assert_eq!(inner.kind(), ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
