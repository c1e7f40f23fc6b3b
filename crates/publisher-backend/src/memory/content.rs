//! Content stores and the copy step of a publish job.

use std::collections::{BTreeMap, BTreeSet};

use publisher_core::types::{PublishJob, PublishMode};

/// Normalize an item path: trim whitespace and trailing slashes, force a leading slash.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// One content store.
///
/// Source stores use `items` (path → revision). Target stores use
/// `published`, keyed by `(path, language)` and holding the revision that
/// was last copied over.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: BTreeMap<String, u64>,
    published: BTreeMap<(String, String), u64>,
}

/// Result of applying one job to one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Items copied (per language).
    pub processed: u64,
    /// Human-readable progress messages.
    pub messages: Vec<String>,
    /// Whether the job could not run.
    pub failed: bool,
}

impl ContentStore {
    /// Insert an item or bump its revision. Returns the new revision.
    pub fn touch(&mut self, path: &str) -> u64 {
        let revision = self.items.entry(normalize_path(path)).or_insert(0);
        *revision += 1;
        *revision
    }

    /// Remove an item and its descendants. Returns how many were removed.
    pub fn remove(&mut self, path: &str) -> usize {
        let path = normalize_path(path);
        let doomed: Vec<String> = std::iter::once(path.clone())
            .filter(|p| self.items.contains_key(p))
            .chain(self.descendants(&path))
            .collect();
        for p in &doomed {
            self.items.remove(p);
        }
        doomed.len()
    }

    /// Whether an item exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.items.contains_key(&normalize_path(path))
    }

    /// Revision last published for `(path, language)`.
    pub fn published_revision(&self, path: &str, language: &str) -> Option<u64> {
        self.published
            .get(&(normalize_path(path), language.to_string()))
            .copied()
    }

    fn descendants(&self, path: &str) -> Vec<String> {
        let prefix = format!("{path}/");
        self.items
            .range(prefix.clone()..)
            .take_while(|(p, _)| p.starts_with(&prefix))
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn ancestors(&self, path: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut current = path;
        while let Some(idx) = current.rfind('/') {
            current = &current[..idx];
            if current.is_empty() {
                break;
            }
            if self.items.contains_key(current) {
                found.push(current.to_string());
            }
        }
        found
    }

    /// Paths covered by `job`, or `None` if its root item no longer exists.
    fn select(&self, job: &PublishJob) -> Option<BTreeSet<String>> {
        let Some(root) = &job.root else {
            return Some(self.items.keys().cloned().collect());
        };

        if !self.items.contains_key(&root.path) {
            return None;
        }

        let mut selected = BTreeSet::from([root.path.clone()]);
        if job.options.deep {
            selected.extend(self.descendants(&root.path));
        }
        if job.options.related {
            selected.extend(self.ancestors(&root.path));
        }
        Some(selected)
    }

    /// Copy the items selected by `job` from `self` into `target`.
    pub fn publish_into(
        &self,
        target: &mut ContentStore,
        target_name: &str,
        job: &PublishJob,
    ) -> CopyOutcome {
        let mut outcome = CopyOutcome::default();

        let Some(selected) = self.select(job) else {
            let path = job.root.as_ref().map(|r| r.path.as_str()).unwrap_or("/");
            outcome.failed = true;
            outcome
                .messages
                .push(format!("Item {path} no longer exists in {}", job.source.name));
            return outcome;
        };

        for language in &job.languages {
            let mut copied = 0u64;
            let mut skipped = 0u64;

            for path in &selected {
                let Some(&revision) = self.items.get(path) else {
                    continue;
                };
                let key = (path.clone(), language.clone());
                if job.options.mode == PublishMode::Smart
                    && target.published.get(&key) == Some(&revision)
                {
                    skipped += 1;
                    continue;
                }
                target.published.insert(key, revision);
                copied += 1;
            }

            if job.options.mode == PublishMode::Republish && job.root.is_none() {
                let before = target.published.len();
                target
                    .published
                    .retain(|(path, lang), _| lang != language || self.items.contains_key(path));
                let removed = before - target.published.len();
                if removed > 0 {
                    outcome.messages.push(format!(
                        "{target_name}/{language}: removed {removed} item(s) missing from {}",
                        job.source.name
                    ));
                }
            }

            outcome.processed += copied;
            outcome.messages.push(format!(
                "{target_name}/{language}: {copied} published, {skipped} unchanged"
            ));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use publisher_core::types::{ItemRef, PublishOptions, StoreRef};

    fn store(paths: &[&str]) -> ContentStore {
        let mut store = ContentStore::default();
        for p in paths {
            store.touch(p);
        }
        store
    }

    fn job(root: Option<&str>, mode: PublishMode, deep: bool, related: bool) -> PublishJob {
        PublishJob {
            source: StoreRef {
                name: "master".to_string(),
            },
            targets: vec![StoreRef {
                name: "web".to_string(),
            }],
            languages: vec!["en".to_string()],
            root: root.map(|p| ItemRef {
                store: "master".to_string(),
                path: p.to_string(),
            }),
            options: PublishOptions {
                mode,
                deep,
                related,
            },
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(" /content/home/ "), "/content/home");
        assert_eq!(normalize_path("content"), "/content");
    }

    #[test]
    fn test_deep_item_includes_descendants_only() {
        let source = store(&["/c", "/c/home", "/c/home/a", "/c/homepage", "/c/other"]);
        let mut target = ContentStore::default();
        let outcome =
            source.publish_into(&mut target, "web", &job(Some("/c/home"), PublishMode::Full, true, false));
        assert_eq!(outcome.processed, 2);
        assert!(target.published_revision("/c/home/a", "en").is_some());
        assert!(target.published_revision("/c/homepage", "en").is_none());
    }

    #[test]
    fn test_related_adds_ancestors() {
        let source = store(&["/c", "/c/home", "/c/home/a"]);
        let mut target = ContentStore::default();
        let outcome = source.publish_into(
            &mut target,
            "web",
            &job(Some("/c/home/a"), PublishMode::Full, false, true),
        );
        assert_eq!(outcome.processed, 3);
    }

    #[test]
    fn test_smart_skips_unchanged() {
        let mut source = store(&["/c", "/c/home"]);
        let mut target = ContentStore::default();
        let smart = job(None, PublishMode::Smart, true, false);

        assert_eq!(source.publish_into(&mut target, "web", &smart).processed, 2);
        assert_eq!(source.publish_into(&mut target, "web", &smart).processed, 0);

        source.touch("/c/home");
        assert_eq!(source.publish_into(&mut target, "web", &smart).processed, 1);
    }

    #[test]
    fn test_republish_drops_items_missing_from_source() {
        let mut source = store(&["/c", "/c/old"]);
        let mut target = ContentStore::default();
        source.publish_into(&mut target, "web", &job(None, PublishMode::Full, true, false));

        source.remove("/c/old");
        let outcome =
            source.publish_into(&mut target, "web", &job(None, PublishMode::Republish, true, false));
        assert_eq!(outcome.processed, 1);
        assert!(target.published_revision("/c/old", "en").is_none());
    }

    #[test]
    fn test_missing_root_fails() {
        let source = store(&["/c"]);
        let mut target = ContentStore::default();
        let outcome =
            source.publish_into(&mut target, "web", &job(Some("/c/gone"), PublishMode::Full, false, false));
        assert!(outcome.failed);
        assert_eq!(outcome.processed, 0);
    }
}
