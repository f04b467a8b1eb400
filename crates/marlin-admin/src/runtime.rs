use anyhow::Context as _;

/// Requests are spawned onto this runtime so it must be entered before any
/// client method is called
pub fn create_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("unable to create runtime")
}
