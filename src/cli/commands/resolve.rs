use crate::config::Config;
use crate::services::ResolveRequest;
use crate::state::SharedState;

pub struct ResolveArgs {
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub place_id: Option<String>,
    pub skip_cache: bool,
    pub types: Vec<String>,
}

pub async fn cmd_resolve(config: Config, args: ResolveArgs) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let mut request = ResolveRequest::new(args.name)
        .skip_cache(args.skip_cache)
        .tags(args.types);
    request.address = args.address;
    request.website = args.website;
    request.place_id = args.place_id;

    let outcome = state.resolver.resolve(request).await?;

    eprintln!(
        "Category: {} | cached: {} | platforms attempted: {}",
        outcome.category,
        outcome.cached,
        outcome.attempted.len()
    );
    println!("{}", serde_json::to_string_pretty(&outcome.data)?);

    Ok(())
}
