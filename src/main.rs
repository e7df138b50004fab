#[tokio::main]
async fn main() -> std::io::Result<()> {
    spacemmo_server::frameworks::server::run_with_config().await
}
