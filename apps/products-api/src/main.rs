//! Products API - REST server

use core_config::tracing::install_color_eyre;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    products_api::run().await
}
