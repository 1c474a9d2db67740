// SPDX-License-Identifier: Apache-2.0

use linkdeck_model::{Configuration, IconType, LinkId, LinkItem, ValidationError};

use crate::error::EditError;

/// Everything the caller supplies for a new link; `id` and `order` are
/// assigned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDraft {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub icon_type: IconType,
    pub show: bool,
}

impl LinkDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon: String::new(),
            icon_type: IconType::Lucide,
            show: true,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>, icon_type: IconType) -> Self {
        self.icon = icon.into();
        self.icon_type = icon_type;
        self
    }
}

/// Field-level patch for `update_link`. `id` and `order` are immutable
/// through that call and deliberately have no slot here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub icon_type: Option<IconType>,
    pub show: Option<bool>,
}

/// Smallest decimal id greater than every existing decimal id. Matches the
/// caller-generated numeric tokens the wire format carries, and cannot
/// collide with non-decimal ids.
#[must_use]
pub fn fresh_link_id(links: &[LinkItem]) -> LinkId {
    let max_numeric = links
        .iter()
        .filter_map(|l| l.id.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let mut candidate = max_numeric.saturating_add(1);
    loop {
        let id = LinkId::numeric(candidate);
        if !links.iter().any(|l| l.id == id) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}

pub fn add_link(config: &Configuration, draft: LinkDraft) -> Result<Configuration, EditError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Empty("link name").into());
    }
    if draft.url.trim().is_empty() {
        return Err(ValidationError::Empty("link url").into());
    }
    let mut next = config.clone();
    next.normalize_link_order();
    let id = fresh_link_id(&next.links);
    let order = next.links.len() as u32;
    next.links.push(LinkItem {
        id,
        name: draft.name,
        url: draft.url,
        icon: draft.icon,
        icon_type: draft.icon_type,
        show: draft.show,
        order,
    });
    Ok(next)
}

pub fn update_link(
    config: &Configuration,
    link_id: &LinkId,
    patch: LinkPatch,
) -> Result<Configuration, EditError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ValidationError::Empty("link name").into());
        }
    }
    if let Some(url) = &patch.url {
        if url.trim().is_empty() {
            return Err(ValidationError::Empty("link url").into());
        }
    }
    let mut next = config.clone();
    let link = next
        .links
        .iter_mut()
        .find(|l| l.id == *link_id)
        .ok_or_else(|| EditError::LinkNotFound(link_id.clone()))?;
    if let Some(name) = patch.name {
        link.name = name;
    }
    if let Some(url) = patch.url {
        link.url = url;
    }
    if let Some(icon) = patch.icon {
        link.icon = icon;
    }
    if let Some(icon_type) = patch.icon_type {
        link.icon_type = icon_type;
    }
    if let Some(show) = patch.show {
        link.show = show;
    }
    Ok(next)
}

pub fn delete_link(config: &Configuration, link_id: &LinkId) -> Result<Configuration, EditError> {
    let mut next = config.clone();
    next.normalize_link_order();
    let position = next
        .links
        .iter()
        .position(|l| l.id == *link_id)
        .ok_or_else(|| EditError::LinkNotFound(link_id.clone()))?;
    next.links.remove(position);
    rerank(&mut next);
    Ok(next)
}

pub fn toggle_visibility(
    config: &Configuration,
    link_id: &LinkId,
) -> Result<Configuration, EditError> {
    let mut next = config.clone();
    let link = next
        .links
        .iter_mut()
        .find(|l| l.id == *link_id)
        .ok_or_else(|| EditError::LinkNotFound(link_id.clone()))?;
    link.show = !link.show;
    Ok(next)
}

/// Moves the link at display position `from` to display position `to`,
/// then re-ranks the whole sequence densely from zero.
pub fn reorder_links(
    config: &Configuration,
    from: usize,
    to: usize,
) -> Result<Configuration, EditError> {
    let mut next = config.clone();
    next.normalize_link_order();
    let len = next.links.len();
    if from >= len {
        return Err(EditError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(EditError::IndexOutOfRange { index: to, len });
    }
    if from == to {
        return Ok(next);
    }
    let moved = next.links.remove(from);
    next.links.insert(to, moved);
    rerank(&mut next);
    Ok(next)
}

fn rerank(config: &mut Configuration) {
    for (rank, link) in config.links.iter_mut().enumerate() {
        link.order = rank as u32;
    }
}
