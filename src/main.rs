use clap::Parser;
use notedesk::cli::{
    handle_add, handle_delete, handle_get, handle_list, handle_local_add, handle_local_clear,
    handle_local_delete, handle_local_list, handle_move, Cli, Commands, Context, LocalAction,
};
use notedesk::entity::NoteBucket;
use notedesk::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(&cli.global)?;

    match cli.command {
        Commands::List {
            bucket,
            all,
            query,
            category,
            entity_type,
            json,
        } => handle_list(&ctx, bucket, all, query, category, entity_type, json).await,
        Commands::Get { id, json } => handle_get(&ctx, id, json).await,
        Commands::Add(args) => handle_add(&ctx, args).await,
        Commands::Archive { id } => handle_move(&ctx, id, NoteBucket::Archive).await,
        Commands::Trash { id } => handle_move(&ctx, id, NoteBucket::Trash).await,
        Commands::Restore { id } => handle_move(&ctx, id, NoteBucket::Note).await,
        Commands::Delete { id } => handle_delete(&ctx, id).await,
        Commands::Local(local) => match local.action {
            LocalAction::List { query, json } => handle_local_list(&ctx, query, json),
            LocalAction::Add(args) => handle_local_add(&ctx, args),
            LocalAction::Delete { id } => handle_local_delete(&ctx, id),
            LocalAction::Clear => handle_local_clear(&ctx),
        },
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notedesk=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
