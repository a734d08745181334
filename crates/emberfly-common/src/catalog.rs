//! Image catalog model
//!
//! The catalog is a flat list of bootable images, each tagged with a free-form
//! category token. Categories are derived, not stored: the set of distinct
//! tokens among enabled images, each mapped to a curated display name.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Menu anchors the generator emits for the fixed system entries.
/// An image id must never collide with one of these.
pub const RESERVED_ANCHORS: &[&str] = &["main_menu", "local", "shell", "reboot", "exit", "back_main"];

/// How an image boots once selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Chain to the local disk, nothing is fetched over the network
    Local,
    /// Fetch kernel/initrd/squashfs from the boot server
    #[default]
    Network,
}

/// One bootable entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Unique, menu-anchor-safe token
    pub id: String,

    /// Human label shown in the menu
    pub name: String,

    /// Free-form category token
    #[serde(default = "default_category")]
    pub category: String,

    /// Disabled images are excluded from generated menus entirely
    #[serde(default)]
    pub enabled: bool,

    #[serde(rename = "type", default)]
    pub kind: ImageKind,

    /// Kernel path, relative to the HTTP root (network boot only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initrd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squashfs: Option<String>,

    /// Kernel argument string; a baseline default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_args: Option<String>,
}

fn default_category() -> String {
    "other".to_string()
}

/// Top-level catalog storage format (`images.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Enabled images of one category, in catalog order
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    /// Raw category token, doubles as the menu file stem and anchor stem
    pub token: &'a str,
    /// Curated display name, title-cased fallback for unknown tokens
    pub display_name: String,
    pub images: Vec<&'a Image>,
}

/// Map a category token to its curated display name.
///
/// Unknown tokens fall back to a title-cased rendering of themselves.
pub fn category_display_name(token: &str) -> String {
    match token {
        "ubuntu" => "Ubuntu Distributions".to_string(),
        "debian" => "Debian".to_string(),
        "centos" => "CentOS / RHEL".to_string(),
        "fedora" => "Fedora".to_string(),
        "custom" => "Custom Images".to_string(),
        "tools" => "Diagnostic Tools".to_string(),
        "system" => "System".to_string(),
        "other" => "Other".to_string(),
        _ => title_case(token),
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut at_word_start = true;
    for c in token.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Check that an id is safe to use as a menu anchor (no spaces or specials).
fn is_anchor_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Validate the whole catalog before any menu text is generated.
///
/// Checks id uniqueness, anchor safety, and reserved-anchor collisions.
pub fn validate_catalog(images: &[Image]) -> Result<()> {
    let mut seen = HashSet::new();
    for img in images {
        if !is_anchor_safe(&img.id) {
            return Err(Error::InvalidImageId(img.id.clone()));
        }
        if RESERVED_ANCHORS.contains(&img.id.as_str()) {
            return Err(Error::ReservedAnchor(img.id.clone()));
        }
        if !seen.insert(img.id.as_str()) {
            return Err(Error::DuplicateImageId(img.id.clone()));
        }
    }
    Ok(())
}

/// Group enabled images by category, in first-seen order.
///
/// Categories with zero enabled images produce no group.
pub fn group_enabled(images: &[Image]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for img in images.iter().filter(|i| i.enabled) {
        match groups.iter_mut().find(|g| g.token == img.category) {
            Some(group) => group.images.push(img),
            None => groups.push(CategoryGroup {
                token: &img.category,
                display_name: category_display_name(&img.category),
                images: vec![img],
            }),
        }
    }
    groups
}
