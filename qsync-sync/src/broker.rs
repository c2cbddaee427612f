//! Sync operations exposed to the CLI: pull everything, push one file, post a
//! new draft.
//!
//! Each operation is independent and non-transactional across entries.
//! `pull_all` isolates failures per item: a bad timestamp or a failed write is
//! recorded in the report and the remaining items still sync.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use qsync_core::{
    entry::{local_path, read_entry},
    Entry, EntryId,
};
use qsync_remote::{entry_to_new_item, item_to_entry, Item, RemoteApi};

use crate::error::SyncError;
use crate::validate::{self, Draft};
use crate::writer::{store_fresh, upload_fresh, UploadResult, WriteResult};

/// Default number of pull workers.
pub const DEFAULT_JOBS: usize = 4;

/// Body given to a freshly created post until the author writes one.
pub const PLACEHOLDER_BODY: &str = "Write your article here.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullOptions {
    pub dry_run: bool,
    /// Upper bound on concurrent item writes; values below 1 mean 1.
    pub jobs: usize,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            jobs: DEFAULT_JOBS,
        }
    }
}

/// What happened to one remote item during a pull.
#[derive(Debug)]
pub enum PullOutcome {
    Stored { id: EntryId, result: WriteResult },
    Failed { id: EntryId, error: SyncError },
}

/// Per-item outcomes of a pull, in remote listing order.
#[derive(Debug, Default)]
pub struct PullReport {
    pub outcomes: Vec<PullOutcome>,
}

impl PullReport {
    pub fn written(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::Written { .. } | WriteResult::WouldWrite { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::Unchanged { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&EntryId, &SyncError)> {
        self.outcomes.iter().filter_map(|o| match o {
            PullOutcome::Failed { id, error } => Some((id, error)),
            PullOutcome::Stored { .. } => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    fn count(&self, pred: impl Fn(&WriteResult) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PullOutcome::Stored { result, .. } if pred(result)))
            .count()
    }
}

// ---------------------------------------------------------------------------
// pull_all
// ---------------------------------------------------------------------------

/// Fetch every remote item and store each one under `root` if it is fresher
/// than the local copy.
///
/// Only the listing itself can fail the whole call.
pub fn pull_all(
    api: &dyn RemoteApi,
    root: &Path,
    options: PullOptions,
) -> Result<PullReport, SyncError> {
    let items = api.list_items()?;
    let jobs = options.jobs.clamp(1, items.len().max(1));
    tracing::info!(count = items.len(), jobs, "pulling remote items");

    let outcomes = run_pool(&items, jobs, |item| pull_item(item, root, options.dry_run));
    Ok(PullReport { outcomes })
}

fn pull_item(item: &Item, root: &Path, dry_run: bool) -> PullOutcome {
    let id = EntryId::from(item.id.as_str());
    let stored = item_to_entry(item.clone())
        .map_err(SyncError::from)
        .and_then(|entry| {
            let path = local_path(root, &entry)?;
            store_fresh(&entry, &path, dry_run)
        });
    match stored {
        Ok(result) => PullOutcome::Stored { id, result },
        Err(error) => {
            tracing::warn!(id = %id, error = %error, "failed to pull item");
            PullOutcome::Failed { id, error }
        }
    }
}

/// Run `work` over `inputs` on at most `jobs` scoped threads; results come
/// back in input order.
fn run_pool<T, R, F>(inputs: &[T], jobs: usize, work: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();
    thread::scope(|scope| {
        for _ in 0..jobs {
            let tx = tx.clone();
            let next = &next;
            let work = &work;
            scope.spawn(move || loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(input) = inputs.get(index) else {
                    break;
                };
                if tx.send((index, work(input))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, R)> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

// ---------------------------------------------------------------------------
// push_one
// ---------------------------------------------------------------------------

/// Upload the local file at `path` if it is newer than its remote counterpart.
pub fn push_one(api: &dyn RemoteApi, root: &Path, path: &Path) -> Result<UploadResult, SyncError> {
    let entry = read_entry(path)?;
    tracing::debug!(path = %path.display(), id = %entry.id(), "read local entry");
    upload_fresh(api, root, &entry)
}

// ---------------------------------------------------------------------------
// post_new
// ---------------------------------------------------------------------------

/// Create a private post from `draft` and store the server's copy under `root`.
///
/// The draft is validated before anything is sent.
pub fn post_new(api: &dyn RemoteApi, root: &Path, draft: &Draft) -> Result<WriteResult, SyncError> {
    validate::draft(draft)?;

    let entry = Entry::draft(draft.title.trim(), draft.tags.clone(), PLACEHOLDER_BODY);
    let created = item_to_entry(api.create_item(&entry_to_new_item(&entry))?)?;
    tracing::info!(id = %created.id(), url = %created.header.url, "created");

    let path = local_path(root, &created)?;
    store_fresh(&created, &path, false)
}
