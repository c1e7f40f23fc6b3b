//! Publish request model.
//!
//! A [`PublishRequest`] is what a caller asks for; a [`PublishJob`] is the
//! resolved submission handed to the backend once every store and item in
//! the request has been looked up.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a publish request covers and how the backend should treat it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublishScope {
    /// Incremental publish of the whole source store.
    SiteSmart,
    /// Full republish of the whole source store in every language it knows.
    SiteRepublishAll,
    /// One item, plus its descendants when `deep` is set.
    Item {
        /// Path of the item in the source store.
        path: String,
        /// Include descendants.
        deep: bool,
    },
    /// One item with independently toggled subtree, incremental and related flags.
    EdgeItem {
        /// Path of the item in the source store.
        path: String,
        /// Include descendants.
        children: bool,
        /// Skip items unchanged since the last publish.
        smart: bool,
        /// Also publish related items.
        related: bool,
    },
}

impl PublishScope {
    /// Path of the targeted item, for item-scoped requests.
    pub fn item_path(&self) -> Option<&str> {
        match self {
            Self::Item { path, .. } | Self::EdgeItem { path, .. } => Some(path),
            Self::SiteSmart | Self::SiteRepublishAll => None,
        }
    }

    /// Whether the language list comes from the source store's catalog.
    pub fn uses_language_catalog(&self) -> bool {
        matches!(self, Self::SiteRepublishAll)
    }

    /// Backend options implied by this scope.
    pub fn options(&self) -> PublishOptions {
        match self {
            Self::SiteSmart => PublishOptions {
                mode: PublishMode::Smart,
                deep: true,
                related: false,
            },
            Self::SiteRepublishAll => PublishOptions {
                mode: PublishMode::Republish,
                deep: true,
                related: false,
            },
            Self::Item { deep, .. } => PublishOptions {
                mode: PublishMode::Full,
                deep: *deep,
                related: false,
            },
            Self::EdgeItem {
                children,
                smart,
                related,
                ..
            } => PublishOptions {
                mode: if *smart {
                    PublishMode::Smart
                } else {
                    PublishMode::Full
                },
                deep: *children,
                related: *related,
            },
        }
    }
}

impl fmt::Display for PublishScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteSmart => write!(f, "site (smart)"),
            Self::SiteRepublishAll => write!(f, "site (republish, all languages)"),
            Self::Item { path, deep } => write!(f, "item {path} (deep={deep})"),
            Self::EdgeItem {
                path,
                children,
                smart,
                related,
            } => write!(
                f,
                "item {path} (children={children}, smart={smart}, related={related})"
            ),
        }
    }
}

/// A caller's publish request, with every default already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Store the content is read from.
    pub source_store: String,
    /// Store the content is written to.
    pub target_store: String,
    /// Languages to publish. Ignored for catalog-wide republishes.
    pub languages: Vec<String>,
    /// What to publish.
    pub scope: PublishScope,
}

/// How the backend decides which items to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Copy only items changed since the last publish.
    Smart,
    /// Copy every item in scope.
    Full,
    /// Copy every item in scope and drop target entries missing from the source.
    Republish,
}

/// Flags passed through to the backend alongside the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOptions {
    /// Item selection mode.
    pub mode: PublishMode,
    /// Include descendants of an item.
    pub deep: bool,
    /// Include related items.
    pub related: bool,
}

/// A store the backend has confirmed exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRef {
    /// Store name.
    pub name: String,
}

/// An item the backend has confirmed exists in a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// Store the item lives in.
    pub store: String,
    /// Normalized item path.
    pub path: String,
}

/// Resolved submission for one backend job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishJob {
    /// Store to read from.
    pub source: StoreRef,
    /// Stores to write to.
    pub targets: Vec<StoreRef>,
    /// Languages to publish; never empty.
    pub languages: Vec<String>,
    /// Root item, or `None` for the whole store.
    pub root: Option<ItemRef>,
    /// Mode and flags.
    pub options: PublishOptions,
}
