//! HTTP surface of the SLRG member registry.
//!
//! Exposes CRUD routes for every entity collection plus the per-member
//! related lists, translating core outcomes into status codes, alert headers
//! and pagination headers.

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

pub mod error;
pub mod headers;
pub mod routes;
pub mod settings;
pub mod state;

pub use error::{ApiError, StartupError};
pub use routes::build_router;
pub use settings::Settings;
pub use state::AppState;

/// Opens the database, binds the listener and serves until shutdown.
pub async fn serve(settings: Settings) -> Result<(), StartupError> {
    let state = AppState::open(&settings.database, settings.paging)?;
    let app = build_router(state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("event=server_start module=server status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("event=shutdown_signal module=server signal=ctrl_c"),
            Err(err) => {
                warn!("event=shutdown_signal module=server status=error signal=ctrl_c error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown_signal module=server signal=terminate");
            }
            Err(err) => {
                warn!("event=shutdown_signal module=server status=error signal=terminate error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
