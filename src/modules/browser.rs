// Application object: registry + lists + settings, driven by Commands.
// The desktop shell owns one of these behind a Mutex; tests own one
// directly with a recording host.

use std::sync::Arc;

use crate::error::{BrowserError, Result};
use crate::modules::closed_tabs::ClosedTabs;
use crate::modules::favicon::FaviconResolver;
use crate::modules::list_store::ListStore;
use crate::modules::lists::{BookmarkList, HistoryList};
use crate::modules::navigation::normalize_input;
use crate::modules::presentation::{self, Command, HoverPreview, TabStripView};
use crate::modules::relay::RelayClient;
use crate::modules::surface::{LoadEvent, SessionId, SurfaceHost};
use crate::modules::tabs::SessionRegistry;
use crate::settings::Settings;

pub struct Browser<H: SurfaceHost> {
    settings: Settings,
    registry: SessionRegistry<H>,
    history: HistoryList,
    bookmarks: BookmarkList,
    closed: ClosedTabs,
    /// Bumped by list changes the tab strip shows (bookmarks).
    revision: u64,
}

impl<H: SurfaceHost> Browser<H> {
    /// Builds an empty browser; lists are read from `store`.
    pub fn new(settings: Settings, host: H, store: Arc<dyn ListStore>) -> Self {
        let registry = SessionRegistry::new(
            host,
            RelayClient::new(settings.relay_base.clone()),
            FaviconResolver::new(settings.favicon_service.clone()),
        );
        Self {
            closed: ClosedTabs::new(settings.max_closed_tabs),
            history: HistoryList::load(store.clone()),
            bookmarks: BookmarkList::load(store),
            registry,
            settings,
            revision: 0,
        }
    }

    /// Opens the initial tab at the homepage.
    pub fn start(&mut self) -> Result<SessionId> {
        let homepage = self.settings.homepage.clone();
        let id = self.registry.create(&homepage)?.id();
        log::info!("[Browser] Started with {} at {}", id.label(), homepage);
        Ok(id)
    }

    /// Runs one UI command. Unknown ids are logged and ignored; surface
    /// failures are returned.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        log::debug!("[Browser] {:?}", command);
        match self.apply(command) {
            Err(BrowserError::NotFound(id)) => {
                log::warn!("[Browser] Ignoring command for missing session {}", id);
                Ok(())
            }
            other => other,
        }
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::NewTab { url } => {
                self.new_tab(url.as_deref())?;
            }
            Command::SwitchTab { id } => self.registry.switch_to(id)?,
            Command::CloseTab { id } => self.close_tab(id)?,
            Command::Reorder { source, target } => {
                self.registry.reorder(source, target)?;
            }
            Command::Navigate { input } => {
                self.registry.navigate(&input, &mut self.history)?;
            }
            Command::ReloadActive => {
                self.registry.reload_active()?;
            }
            Command::Back => {
                self.registry.back()?;
            }
            Command::Forward => {
                self.registry.forward()?;
            }
            Command::GoHome => {
                let homepage = self.settings.homepage.clone();
                self.registry.navigate(&homepage, &mut self.history)?;
            }
            Command::BookmarkActive => {
                self.bookmark_active();
            }
            Command::RemoveBookmark { url } => {
                if self.bookmarks.remove(&url) {
                    self.revision += 1;
                }
            }
            Command::ClearHistory => self.history.clear(),
            Command::ReopenClosed => {
                self.reopen_closed()?;
            }
        }
        Ok(())
    }

    /// Opens `input` (or the homepage) in a new active tab.
    pub fn new_tab(&mut self, input: Option<&str>) -> Result<SessionId> {
        let url = input
            .and_then(normalize_input)
            .unwrap_or_else(|| self.settings.homepage.clone());
        Ok(self.registry.create(&url)?.id())
    }

    pub fn close_tab(&mut self, id: SessionId) -> Result<()> {
        let closed = self.registry.close(id)?;
        self.closed.archive(closed);
        Ok(())
    }

    /// Reopens the most recently closed tab under a fresh id.
    pub fn reopen_closed(&mut self) -> Result<Option<SessionId>> {
        let Some(tab) = self.closed.pop() else {
            return Ok(None);
        };
        match self.registry.create(&tab.url) {
            Ok(session) => Ok(Some(session.id())),
            Err(e) => {
                // Keep it for another attempt
                self.closed.archive(tab);
                Err(e)
            }
        }
    }

    /// Returns false when there is no active tab or it is already bookmarked.
    pub fn bookmark_active(&mut self) -> bool {
        let Some(session) = self.registry.active() else {
            return false;
        };
        let url = session.url().to_string();
        let added = self.bookmarks.add(url);
        if added {
            self.revision += 1;
        }
        added
    }

    pub fn complete_load(&mut self, event: LoadEvent) -> bool {
        self.registry.complete_load(event)
    }

    pub fn view(&self) -> TabStripView {
        let mut view = presentation::render(&self.registry, &self.bookmarks);
        // Both counters only grow, so the sum moves whenever either does
        view.revision += self.revision;
        view
    }

    pub fn hover_preview(&self, id: SessionId) -> Option<HoverPreview> {
        presentation::hover_preview(&self.registry, id)
    }

    pub fn registry(&self) -> &SessionRegistry<H> {
        &self.registry
    }

    pub fn history(&self) -> &HistoryList {
        &self.history
    }

    pub fn bookmarks(&self) -> &BookmarkList {
        &self.bookmarks
    }

    pub fn closed_tabs(&self) -> &ClosedTabs {
        &self.closed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
