//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Wires the two sheet stores into the application state
//! - Starts the HTTP server with graceful shutdown support

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// Module declarations
mod error;
mod handler;
mod menu;
mod model;
mod orders;
mod route;
mod store;

use menu::MenuStore;
use orders::OrderStore;
use route::create_app;
use store::AppState;

/// Application entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from .env file
/// 2. Reads configuration (port, sheet paths, static asset directory)
/// 3. Creates the application state and router
/// 4. Starts the HTTP server with graceful shutdown handling
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 3000)
/// - `ORDERS_FILE` - Path to the order sheet (default: "orders-log.csv")
/// - `MENU_FILE` - Path to the menu sheet (default: "menu.csv")
/// - `STATIC_DIR` - Directory served for non-API paths (default: "public")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("foodfest=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let port: u16 = port_str.parse().unwrap_or(3000);

    let orders_file = env::var("ORDERS_FILE").unwrap_or_else(|_| "orders-log.csv".to_string());
    let menu_file = env::var("MENU_FILE").unwrap_or_else(|_| "menu.csv".to_string());
    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

    // Both sheet files are created lazily on first write
    let state = AppState {
        orders: OrderStore::new(&orders_file),
        menu: MenuStore::new(&menu_file),
    };

    // API routes plus the static asset fallback
    let app = create_app(state)
        .fallback_service(ServeDir::new(&static_dir))
        .layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🍜 FoodFest server running at http://localhost:{}", port);
    println!("📄 Orders sheet: {}", orders_file);
    println!("📄 Menu sheet: {}", menu_file);

    // Connect info is attached so handlers can fall back to the peer
    // address when no forwarding header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap();
}

/// Handles graceful shutdown signals
///
/// This function listens for shutdown signals and returns when one is received:
/// - SIGINT (Ctrl+C) - Interrupt signal from terminal
/// - SIGTERM - Termination signal (common in Docker/Kubernetes)
///
/// When a signal is received the function returns, triggering server
/// shutdown; open connections are allowed to complete so an in-flight
/// sheet rewrite is not cut short.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
