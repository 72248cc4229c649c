use app_web::web_service;

#[tokio::main]
async fn main() {
    if let Err(e) = web_service().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
