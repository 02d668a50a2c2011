use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::Path;
use tokio::signal;
use tracing::{error, info};

use flota_transporte::config::environment::EnvironmentConfig;
use flota_transporte::database;
use flota_transporte::routes;
use flota_transporte::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚌 Flota Transporte - Backend multiempresa");
    info!("==========================================");

    let config = EnvironmentConfig::default();

    // Inicializar el directorio global
    let pool = match database::connection::create_primary_pool(Path::new(&config.data_dir)).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(pool, config);
    let app = routes::create_api_router(state.clone());

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Liveness probe");
    info!("   POST   /token - Login (form username + password)");
    info!("   POST   /empresas/ - Registrar empresa");
    info!("   POST   /usuarios/ - Crear usuario (admin)");
    info!("   GET    /usuarios/ - Listar usuarios");
    info!("   POST   /conductores/ - Crear conductores (lote)");
    info!("   GET    /conductores/ - Listar conductores");
    info!("   GET    /conductor/:cedula - Obtener conductor");
    info!("   POST   /vehiculos/ - Crear vehículos (lote)");
    info!("   GET    /vehiculos/ - Listar vehículos");
    info!("   GET    /vehiculo/:placa - Obtener vehículo");
    info!("   POST   /rutas/ - Crear rutas (lote)");
    info!("   GET    /rutas/ - Listar rutas");
    info!("   GET    /ruta/:codigo - Obtener ruta");
    info!("   POST   /trayectos/ - Crear trayecto");
    info!("   POST   /trayectos/bulk - Importar trayectos desde CSV");
    info!("   GET    /trayectos/ - Listar trayectos");
    info!("   GET    /trayectos/activos/ - Trayectos desde hoy");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    // Cerrar la base principal y todas las bases por empresa
    state.shutdown().await;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
