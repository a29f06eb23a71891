#[tokio::main]
async fn main() -> eyre::Result<()> {
    checkout::run().await
}
