//! Task commands: list, add, edit, done, rm.
//!
//! Mutating commands prime the cache with a full fetch first — the replica
//! must mirror the server before a toggle can read last-known state.

use anyhow::{Result, bail};
use std::sync::Arc;
use taskdeck_client::{SessionStore, TaskCache};
use taskdeck_core::api::ApiTransport;
use taskdeck_core::task::{Task, TaskPatch};

use super::friendly;

fn ensure_authenticated(session: &SessionStore) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in. Run `taskdeck login` first.");
    }
    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    println!("{:>4} [{}] {}", task.id, mark, task.title);
    if !task.description.is_empty() {
        println!("         {}", task.description);
    }
}

async fn primed_cache(
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
) -> Result<TaskCache> {
    ensure_authenticated(&session)?;
    let mut cache = TaskCache::new(transport, session);
    cache.fetch_all().await.map_err(friendly)?;
    Ok(cache)
}

pub async fn list(transport: Arc<dyn ApiTransport>, session: Arc<SessionStore>) -> Result<()> {
    let cache = primed_cache(transport, session).await?;
    if cache.tasks().is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    for task in cache.tasks() {
        print_task(task);
    }
    Ok(())
}

pub async fn add(
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    title: &str,
    description: &str,
) -> Result<()> {
    ensure_authenticated(&session)?;
    let mut cache = TaskCache::new(transport, session);
    let task = cache.create(title, description).await.map_err(friendly)?;
    println!("Added task {}", task.id);
    print_task(&task);
    Ok(())
}

pub async fn edit(
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut patch = TaskPatch::new();
    if let Some(title) = title {
        patch = patch.with_title(title);
    }
    if let Some(description) = description {
        patch = patch.with_description(description);
    }
    if patch.is_empty() {
        bail!("Nothing to change. Pass --title and/or --description.");
    }

    let mut cache = primed_cache(transport, session).await?;
    let task = cache.update(id, patch).await.map_err(friendly)?;
    print_task(&task);
    Ok(())
}

pub async fn done(
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    id: i64,
) -> Result<()> {
    let mut cache = primed_cache(transport, session).await?;
    let task = cache.toggle_completed(id).await.map_err(friendly)?;
    print_task(&task);
    Ok(())
}

pub async fn remove(
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    id: i64,
) -> Result<()> {
    let mut cache = primed_cache(transport, session).await?;
    cache.delete(id).await.map_err(friendly)?;
    println!("Deleted task {}", id);
    Ok(())
}
