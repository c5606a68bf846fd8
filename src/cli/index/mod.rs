//! Index command - embed the corpus and write the cache, then exit

use clap::Args;
use tracing::info;

use crate::domain::DocumentStore;
use crate::infrastructure::services::IndexOrigin;

#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// Discard an existing cache and re-embed the whole corpus
    #[arg(long)]
    pub rebuild: bool,
}

pub async fn run(args: IndexArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let credentials = crate::create_credential_provider(&config);
    let embedder = crate::create_embedding_provider(&config, &credentials).await?;
    let service = crate::create_indexing_service(&config, embedder);

    let (store, origin) = if args.rebuild {
        (service.rebuild().await?, IndexOrigin::Built)
    } else {
        service.load_or_build().await?
    };
    let documents = store.count_documents().await?;

    info!(
        documents,
        origin = ?origin,
        cache = %service.cache_path().display(),
        "Document store ready"
    );

    Ok(())
}
