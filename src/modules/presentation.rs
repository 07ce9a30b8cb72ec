// Render model for the tab strip, hover previews and the address bar,
// plus the commands the UI sends back. Every element carries its session
// id; nothing is ever matched back by displayed text.

use serde::{Deserialize, Serialize};

use crate::modules::lists::BookmarkList;
use crate::modules::surface::{SessionId, SurfaceHost};
use crate::modules::tabs::{Session, SessionRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub id: SessionId,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub loading: bool,
    pub active: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStripView {
    pub tabs: Vec<TabView>,
    pub active_tab_id: Option<SessionId>,
    pub address: String,
    pub revision: u64,
    pub bookmarks: Vec<String>,
    pub active_bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverPreview {
    pub id: SessionId,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
}

/// Everything the UI can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Opens the homepage when `url` is absent.
    NewTab { url: Option<String> },
    SwitchTab { id: SessionId },
    CloseTab { id: SessionId },
    Reorder { source: SessionId, target: SessionId },
    Navigate { input: String },
    ReloadActive,
    Back,
    Forward,
    GoHome,
    BookmarkActive,
    RemoveBookmark { url: String },
    ClearHistory,
    ReopenClosed,
}

fn tab_view<S>(session: &Session<S>, active: Option<SessionId>) -> TabView {
    TabView {
        id: session.id(),
        title: session.title().to_string(),
        url: session.url().to_string(),
        favicon: session.favicon().map(str::to_string),
        loading: session.is_loading(),
        active: active == Some(session.id()),
        can_go_back: session.can_go_back(),
        can_go_forward: session.can_go_forward(),
    }
}

pub fn render<H: SurfaceHost>(registry: &SessionRegistry<H>, bookmarks: &BookmarkList) -> TabStripView {
    let active = registry.active_id();
    TabStripView {
        tabs: registry.sessions().map(|s| tab_view(s, active)).collect(),
        active_tab_id: active,
        address: registry.address().to_string(),
        revision: registry.revision(),
        bookmarks: bookmarks.entries().to_vec(),
        active_bookmarked: registry.active().is_some_and(|s| bookmarks.contains(s.url())),
    }
}

pub fn hover_preview<H: SurfaceHost>(registry: &SessionRegistry<H>, id: SessionId) -> Option<HoverPreview> {
    let session = registry.get(id).ok()?;
    Some(HoverPreview {
        id,
        title: session.title().to_string(),
        url: session.url().to_string(),
        favicon: session.favicon().map(str::to_string),
    })
}
