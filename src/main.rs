use std::{env, fs, path::Path, time::Duration};

use actix_web::{middleware, web, App, HttpServer};

use hotelier::{api::ApiClient, routes, state::AppState, store::JsonStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let api = match env::var("UPSTREAM_API_URL") {
        Ok(url) if !url.trim().is_empty() => {
            log::info!("Using upstream API at {url}");
            ApiClient::remote(url)
        }
        _ => {
            let data_path = env::var("HOTEL_DATA_PATH")
                .unwrap_or_else(|_| "./data/hotel-store.json".to_string());
            ensure_parent_dir(&data_path)?;
            let latency_ms: u64 = env::var("MOCK_LATENCY_MS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(300);
            log::info!("Using local store at {data_path} ({latency_ms}ms simulated latency)");
            ApiClient::mock(JsonStore::open(&data_path))
                .with_latency(Duration::from_millis(latency_ms))
        }
    };

    let state = AppState { api };

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);

    let address = format!("0.0.0.0:{port}");
    log::info!("Starting hotelier on http://{address}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}

fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
