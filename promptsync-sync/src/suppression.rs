//! Per-path suppression of external-edit detection
//!
//! A path is suppressed while at least one [`SuppressionGuard`] for it is
//! alive. Guards release on drop, so a failed or cancelled write cannot leave
//! its path suppressed. Entries that outlive the timeout are treated as
//! expired and pruned on the next lookup.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{trace, warn};

#[derive(Debug)]
struct Entry {
    generation: u64,
    count: usize,
    acquired: Instant,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<PathBuf, Entry>,
    next_generation: u64,
}

/// The set of rules file paths currently being written by this process.
#[derive(Debug, Clone)]
pub struct SuppressionSet {
    state: Arc<Mutex<State>>,
    timeout: Duration,
}

impl SuppressionSet {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Suppress detection on `path` until the returned guard is dropped.
    ///
    /// Overlapping guards on one path compose: the path stays suppressed
    /// until the last one is released.
    pub fn suppress(&self, path: &Path) -> SuppressionGuard {
        let key = normalize_path(path);
        let now = Instant::now();
        let mut guard = self.lock();
        let state = &mut *guard;

        let generation = match state.entries.get_mut(&key) {
            Some(entry) if now.duration_since(entry.acquired) < self.timeout => {
                entry.count += 1;
                entry.acquired = now;
                entry.generation
            }
            _ => {
                state.next_generation += 1;
                let generation = state.next_generation;
                state.entries.insert(
                    key.clone(),
                    Entry {
                        generation,
                        count: 1,
                        acquired: now,
                    },
                );
                generation
            }
        };
        trace!("Suppressed {}", key.display());

        SuppressionGuard {
            state: Arc::clone(&self.state),
            path: key,
            generation,
        }
    }

    /// Whether detection on `path` is currently suppressed. Expired entries
    /// are pruned here.
    pub fn is_suppressed(&self, path: &Path) -> bool {
        let key = normalize_path(path);
        let mut state = self.lock();
        let Some(entry) = state.entries.get(&key) else {
            return false;
        };

        let held = entry.acquired.elapsed();
        if held < self.timeout {
            return true;
        }

        warn!(
            "Suppression on {} expired after {:?} with {} holder(s) outstanding",
            key.display(),
            held,
            entry.count
        );
        state.entries.remove(&key);
        false
    }
}

impl Default for SuppressionSet {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            promptsync_common::constants::DEFAULT_SUPPRESSION_TIMEOUT_MS,
        ))
    }
}

/// Releases one hold on a suppressed path when dropped.
#[derive(Debug)]
#[must_use = "suppression is released as soon as the guard is dropped"]
pub struct SuppressionGuard {
    state: Arc<Mutex<State>>,
    path: PathBuf,
    generation: u64,
}

impl SuppressionGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let release = match state.entries.get_mut(&self.path) {
            // An expired entry may have been replaced by a newer hold
            Some(entry) if entry.generation == self.generation => {
                entry.count = entry.count.saturating_sub(1);
                entry.count == 0
            }
            _ => false,
        };
        if release {
            state.entries.remove(&self.path);
            trace!("Released suppression on {}", self.path.display());
        }
    }
}

/// Key used to compare rules file paths.
///
/// The path is made absolute and `.`/`..` are collapsed. The deepest ancestor
/// directory that exists is canonicalized and the remaining components are
/// appended unchanged, so a key taken before a write creates the parent
/// directories equals one taken after.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let lexical = collapse_dots(&absolute);

    let (Some(parent), Some(name)) = (lexical.parent(), lexical.file_name()) else {
        return lexical;
    };

    let mut missing = vec![name.to_os_string()];
    let mut ancestor = parent;
    loop {
        if let Ok(resolved) = ancestor.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(resolved, |key, component| key.join(component));
        }
        match (ancestor.parent(), ancestor.file_name()) {
            (Some(up), Some(component)) => {
                missing.push(component.to_os_string());
                ancestor = up;
            }
            _ => return lexical,
        }
    }
}

fn collapse_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_guard_scopes_suppression() {
        let set = SuppressionSet::default();
        let path = Path::new("/tmp/promptsync-suppression/.cursorrules");

        assert!(!set.is_suppressed(path));
        {
            let _guard = set.suppress(path);
            assert!(set.is_suppressed(path));
        }
        assert!(!set.is_suppressed(path));
    }

    #[test]
    fn test_suppression_is_per_path() {
        let set = SuppressionSet::default();
        let _guard = set.suppress(Path::new("/a/global_rules.md"));
        assert!(!set.is_suppressed(Path::new("/b/.windsurfrules")));
    }

    #[test]
    fn test_overlapping_guards_compose() {
        let set = SuppressionSet::default();
        let path = Path::new("/repo/.windsurfrules");

        let first = set.suppress(path);
        let second = set.suppress(path);
        drop(first);
        assert!(set.is_suppressed(path));
        drop(second);
        assert!(!set.is_suppressed(path));
    }

    #[test]
    fn test_equivalent_spellings_share_suppression() {
        let temp_dir = tempdir().unwrap();
        let set = SuppressionSet::default();
        let direct = temp_dir.path().join(".cursorrules");
        let dotted = temp_dir.path().join("sub").join("..").join(".").join(".cursorrules");

        let _guard = set.suppress(&direct);
        assert!(set.is_suppressed(&dotted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_suppression_self_heals() {
        let set = SuppressionSet::new(Duration::from_millis(1_000));
        let path = Path::new("/repo/.cursorrules");

        let guard = set.suppress(path);
        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(set.is_suppressed(path));

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(!set.is_suppressed(path));

        // A stale guard must not release a newer hold
        let fresh = set.suppress(path);
        drop(guard);
        assert!(set.is_suppressed(path));
        drop(fresh);
        assert!(!set.is_suppressed(path));
    }

    #[test]
    fn test_key_is_stable_when_parent_directories_appear() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".trae").join("rules").join("project_rules.md");

        let before = normalize_path(&path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let after = normalize_path(&path);

        assert_eq!(before, after);
        assert!(before.ends_with(".trae/rules/project_rules.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_with_missing_parent_shares_key() {
        let temp_dir = tempdir().unwrap();
        let real = temp_dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let via_link = link.join(".github").join("copilot-instructions.md");
        let set = SuppressionSet::default();
        let _guard = set.suppress(&via_link);

        std::fs::create_dir_all(via_link.parent().unwrap()).unwrap();
        assert!(set.is_suppressed(&via_link));
        assert!(set.is_suppressed(&real.join(".github").join("copilot-instructions.md")));
    }

    #[test]
    fn test_collapse_dots() {
        assert_eq!(
            collapse_dots(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
    }
}
