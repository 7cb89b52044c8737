use std::io::{self, Read};
use std::sync::Arc;

use super::commands::{AddArgs, GlobalArgs};
use crate::api::HttpNotesApi;
use crate::config::Config;
use crate::entity::{Note, NoteBucket, NoteCategory, NoteDraft};
use crate::error::{NotedeskError, Result};
use crate::notes::{LocalNotesPage, NoteFilter, NotesBoard};
use crate::notify::TracingNotifier;
use crate::render;
use crate::storage::LocalStorage;

const PREVIEW_CHARS: usize = 60;

/// Resolved configuration for one CLI invocation.
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let mut config = Config::load(global.config.as_deref())?;

        if let Some(ref user) = global.user {
            config.user_id = Some(user.clone());
        }
        if let Some(ref role) = global.role {
            config.role = role.parse().map_err(NotedeskError::InvalidValue)?;
        }
        if let Some(ref url) = global.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(ref path) = global.storage {
            config.storage_path = path.clone();
        }

        Ok(Self { config })
    }

    fn board(&self) -> Result<NotesBoard> {
        let session = self.config.session();
        if session.user_id().is_none() {
            return Err(NotedeskError::MissingUser);
        }
        let api = HttpNotesApi::from_config(&self.config)?;
        Ok(NotesBoard::new(
            Arc::new(api),
            Arc::new(TracingNotifier::default()),
            session,
        ))
    }

    /// Board with the user's notes already loaded
    async fn loaded_board(&self) -> Result<NotesBoard> {
        let board = self.board()?;
        board.fetch_notes().await?;
        Ok(board)
    }

    fn local_page(&self) -> Result<LocalNotesPage> {
        LocalNotesPage::mount(LocalStorage::open(&self.config.storage_path))
    }
}

fn build_draft(args: AddArgs) -> Result<NoteDraft> {
    let content = if args.stdin {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        args.content.unwrap_or_default()
    };

    let category = args
        .category
        .map(|c| c.parse::<NoteCategory>())
        .transpose()
        .map_err(NotedeskError::InvalidValue)?;

    Ok(NoteDraft {
        title: args.title,
        content,
        color: args.color,
        banner: args.banner,
        is_html: args.html,
        bucket: None,
        category,
        entity_id: args.entity_id,
    })
}

fn build_filter(
    query: Option<String>,
    category: Option<String>,
    entity_type: Option<String>,
) -> Result<NoteFilter> {
    let category = category
        .map(|c| c.parse::<NoteCategory>())
        .transpose()
        .map_err(NotedeskError::InvalidValue)?;
    Ok(NoteFilter {
        query,
        category,
        entity_type,
    })
}

fn print_note_line(note: &Note) {
    let type_str = note
        .category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "note".to_string());
    println!("  ({}) [{}] {}", note.short_id(), type_str, note.title);
    let preview = render::preview(note, PREVIEW_CHARS);
    if !preview.is_empty() {
        println!("      {}", preview);
    }
}

fn print_section(heading: &str, notes: &[Note], filter: &NoteFilter) {
    if notes.is_empty() {
        if filter.is_empty() {
            println!("No {} found.", heading.to_lowercase());
        } else {
            println!("No {} match the filter.", heading.to_lowercase());
        }
        return;
    }
    println!("{}:\n", heading);
    for n in notes {
        print_note_line(n);
    }
}

fn heading(bucket: NoteBucket) -> &'static str {
    match bucket {
        NoteBucket::Note => "Notes",
        NoteBucket::Archive => "Archived notes",
        NoteBucket::Trash => "Trashed notes",
    }
}

pub async fn handle_list(
    ctx: &Context,
    bucket: String,
    all: bool,
    query: Option<String>,
    category: Option<String>,
    entity_type: Option<String>,
    json: bool,
) -> Result<()> {
    let filter = build_filter(query, category, entity_type)?;
    let buckets: Vec<NoteBucket> = if all {
        NoteBucket::ALL.to_vec()
    } else {
        vec![bucket.parse().map_err(NotedeskError::InvalidValue)?]
    };

    let board = ctx.loaded_board().await?;

    if json {
        if all {
            #[derive(serde::Serialize)]
            struct AllBuckets {
                notes: Vec<Note>,
                archive: Vec<Note>,
                trash: Vec<Note>,
            }
            let out = AllBuckets {
                notes: board.filtered(NoteBucket::Note, &filter),
                archive: board.filtered(NoteBucket::Archive, &filter),
                trash: board.filtered(NoteBucket::Trash, &filter),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            let notes = board.filtered(buckets[0], &filter);
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        return Ok(());
    }

    for (i, b) in buckets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_section(heading(*b), &board.filtered(*b, &filter), &filter);
    }

    Ok(())
}

pub async fn handle_get(ctx: &Context, id: String, json: bool) -> Result<()> {
    let board = ctx.loaded_board().await?;
    let note = board.resolve(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
        return Ok(());
    }

    println!("Note {}", note.id);
    println!("Title: {}", note.title);
    println!("Bucket: {}", note.bucket());
    if let Some(category) = note.category {
        println!("Type: {}", category);
    }
    println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(ref entity_type) = note.entity_type {
        match note.entity_id {
            Some(ref entity_id) => println!("Entity: {} {}", entity_type, entity_id),
            None => println!("Entity: {}", entity_type),
        }
    }
    let text = render::plain_text(&note);
    if !text.is_empty() {
        println!("\n{}", text);
    }

    Ok(())
}

pub async fn handle_add(ctx: &Context, args: AddArgs) -> Result<()> {
    let json = args.json;
    let draft = build_draft(args)?;
    let board = ctx.board()?;

    let note = match board.create_note(draft).await? {
        Some(note) => note,
        None => {
            return Err(NotedeskError::InvalidValue(
                "title and content are required".to_string(),
            ))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note ({}) - {}", note.short_id(), note.title);
    }
    Ok(())
}

pub async fn handle_move(ctx: &Context, id: String, target: NoteBucket) -> Result<()> {
    let board = ctx.loaded_board().await?;
    let note = board.move_note(&id, target).await?;
    println!(
        "Moved note ({}) - {} to {}",
        note.short_id(),
        note.title,
        target
    );
    Ok(())
}

pub async fn handle_delete(ctx: &Context, id: String) -> Result<()> {
    let board = ctx.loaded_board().await?;
    let note = board.delete_note(&id).await?;
    println!("Deleted note ({}) - {}", note.short_id(), note.title);
    Ok(())
}

pub fn handle_local_list(ctx: &Context, query: Option<String>, json: bool) -> Result<()> {
    let page = ctx.local_page()?;
    let filter = build_filter(query, None, None)?;
    let notes: Vec<Note> = filter.apply(page.notes()).into_iter().cloned().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        print_section("Local notes", &notes, &filter);
    }
    Ok(())
}

pub fn handle_local_add(ctx: &Context, args: AddArgs) -> Result<()> {
    let json = args.json;
    let draft = build_draft(args)?;
    let mut page = ctx.local_page()?;

    let note = page.create(draft)?.ok_or_else(|| {
        NotedeskError::InvalidValue("title and content are required".to_string())
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created local note ({}) - {}", note.short_id(), note.title);
    }
    Ok(())
}

pub fn handle_local_delete(ctx: &Context, id: String) -> Result<()> {
    let mut page = ctx.local_page()?;
    let note = page.delete(&id)?;
    println!("Deleted local note ({}) - {}", note.short_id(), note.title);
    Ok(())
}

pub fn handle_local_clear(ctx: &Context) -> Result<()> {
    let mut page = ctx.local_page()?;
    let count = page.notes().len();
    page.clear()?;
    println!("Removed {} local note(s)", count);
    Ok(())
}
