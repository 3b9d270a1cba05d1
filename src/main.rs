#[tokio::main]
async fn main() -> std::io::Result<()> {
    sunnah_prayer::start_server().await
}
