use altscribe_core::Config;

// Use mimalloc as the global allocator for lower fragmentation in containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let router = altscribe_api::setup::initialize_app(&config).await?;

    altscribe_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
