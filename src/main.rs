#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    nalog_mcp_server::run().await
}
