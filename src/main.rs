use crate::backend::BookingStore;
use crate::booking_manager::BookingManager;
use crate::configuration::Configuration;
use crate::http::create_app;
use crate::json_store::JsonStore;
use crate::local_store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;
mod booking_manager;
mod configuration;
mod errors;
mod http;
mod json_store;
mod local_store;
mod schedule;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
struct AppState<B: BookingStore> {
    manager: BookingManager<B>,
    configuration: Configuration,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("######################");
    println!("# Appointment Booker #");
    println!("######################");

    let configuration = Configuration::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port);
    println!("Accessible at:\n{address}");
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap();

    let app = if let Some(path) = configuration.data_file.clone() {
        let store = JsonStore::open(path).expect("Failed to open the data file");
        info!("Bookings are persisted to the data file");
        let manager = BookingManager::new(store, configuration.strict_reschedule);
        create_app(AppState {
            manager,
            configuration,
        })
    } else {
        let store = MemoryStore::with_default_catalog();
        info!("No data file configured, bookings are impersistent");
        let manager = BookingManager::new(store, configuration.strict_reschedule);
        create_app(AppState {
            manager,
            configuration,
        })
    };

    axum::serve(listener, app).await.unwrap();
}
