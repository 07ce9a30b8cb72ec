// Session registry - pure logic, no Tauri imports.
// Owns the ordered tabs, the active pointer and the surfaces behind them.
//
// Sessions are always addressed by id. Positions shift under close and
// reorder, and load completions can arrive for sessions that are gone.

use std::collections::HashMap;

use crate::error::{BrowserError, Result};
use crate::modules::closed_tabs::ClosedTab;
use crate::modules::favicon::FaviconResolver;
use crate::modules::lists::HistoryList;
use crate::modules::navigation::normalize_input;
use crate::modules::relay::RelayClient;
use crate::modules::surface::{LoadEvent, LoadSubscription, SessionId, Surface, SurfaceHost};
use crate::modules::title;

/// One browsing tab.
#[derive(Debug)]
pub struct Session<S> {
    id: SessionId,
    url: String,
    title: String,
    favicon: Option<String>,
    loading: bool,
    back: Vec<String>,
    forward: Vec<String>,
    subscription: LoadSubscription,
    view: S,
}

impl<S> Session<S> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Last URL explicitly navigated to. The view may still be rendering
    /// the previous page.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn view(&self) -> &S {
        &self.view
    }
}

impl<S> From<&Session<S>> for ClosedTab {
    fn from(session: &Session<S>) -> Self {
        ClosedTab {
            url: session.url.clone(),
            title: session.title.clone(),
            closed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

pub struct SessionRegistry<H: SurfaceHost> {
    host: H,
    relay: RelayClient,
    favicons: FaviconResolver,
    sessions: HashMap<SessionId, Session<H::Surface>>,
    order: Vec<SessionId>,
    active: Option<SessionId>,
    address: String,
    next_id: u64,
    revision: u64,
}

impl<H: SurfaceHost> SessionRegistry<H> {
    pub fn new(host: H, relay: RelayClient, favicons: FaviconResolver) -> Self {
        Self {
            host,
            relay,
            favicons,
            sessions: HashMap::new(),
            order: Vec::new(),
            active: None,
            address: String::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Opens a session at `url` at the end of the strip and makes it active.
    /// On surface failure the registry is left as it was.
    pub fn create(&mut self, url: &str) -> Result<&Session<H::Surface>> {
        // Ids are consumed even if the surface fails, so none is ever reused
        let id = SessionId::new(self.next_id);
        self.next_id += 1;

        let subscription = LoadSubscription::new(id);
        let view = self.host.create(subscription.clone(), &self.relay.wrap(url))?;

        self.sessions.insert(
            id,
            Session {
                id,
                url: url.to_string(),
                title: url.to_string(),
                favicon: self.favicons.resolve(url),
                loading: true,
                back: Vec::new(),
                forward: Vec::new(),
                subscription,
                view,
            },
        );
        self.order.push(id);
        log::info!("[Registry] Created {} at {}", id.label(), url);

        self.switch_to(id)?;
        self.get(id)
    }

    /// Shows `id`, hides every other surface and syncs the address field.
    pub fn switch_to(&mut self, id: SessionId) -> Result<()> {
        if !self.sessions.contains_key(&id) {
            log::warn!("[Registry] switch_to: session not found: {}", id);
            return Err(BrowserError::NotFound(id));
        }

        let mut address = String::new();
        for (session_id, session) in self.sessions.iter_mut() {
            let is_target = *session_id == id;
            session.view.set_visible(is_target);
            if is_target {
                address = session.url.clone();
            }
        }

        self.active = Some(id);
        self.address = address;
        self.revision += 1;
        log::debug!("[Registry] Active session is now {}", id);
        Ok(())
    }

    /// Destroys the session. If it was active, the session now at the same
    /// position (or the new last one) takes over.
    pub fn close(&mut self, id: SessionId) -> Result<ClosedTab> {
        let position = self.position(id).ok_or_else(|| {
            log::warn!("[Registry] close: session not found: {}", id);
            BrowserError::NotFound(id)
        })?;
        let session = self.sessions.remove(&id).ok_or(BrowserError::NotFound(id))?;
        self.order.remove(position);
        session.subscription.cancel();

        if self.active == Some(id) {
            self.active = None;
            if self.order.is_empty() {
                self.address.clear();
            } else {
                let next = self.order[position.min(self.order.len() - 1)];
                self.switch_to(next)?;
            }
        }

        let closed = ClosedTab::from(&session);
        session.view.destroy();
        self.revision += 1;
        log::info!("[Registry] Closed {} ({} remaining)", id.label(), self.order.len());
        Ok(closed)
    }

    /// Moves `source` to sit immediately before `target`. Everything else
    /// keeps its relative order. Returns whether the order changed.
    pub fn reorder(&mut self, source: SessionId, target: SessionId) -> Result<bool> {
        if source == target {
            return Ok(false);
        }
        let from = self.position(source).ok_or(BrowserError::NotFound(source))?;
        let to = self.position(target).ok_or(BrowserError::NotFound(target))?;

        // Index of target once source is pulled out
        let insert_at = if from < to { to - 1 } else { to };
        if insert_at == from {
            return Ok(false);
        }

        let moved = self.order.remove(from);
        self.order.insert(insert_at, moved);
        self.revision += 1;
        log::debug!("[Registry] Reordered: {:?}", self.order);
        Ok(true)
    }

    /// Loads address-field input in the active session, or opens a session
    /// for it when none is active. Only the in-place navigation is recorded
    /// in history. Blank input is ignored.
    pub fn navigate(&mut self, input: &str, history: &mut HistoryList) -> Result<Option<SessionId>> {
        let Some(url) = normalize_input(input) else {
            log::debug!("[Registry] Ignoring blank navigation");
            return Ok(None);
        };

        let Some(active) = self.active else {
            let id = self.create(&url)?.id();
            return Ok(Some(id));
        };

        let session = self.sessions.get_mut(&active).ok_or(BrowserError::NotFound(active))?;
        session.view.load(&self.relay.wrap(&url))?;
        session.subscription.begin_load();

        let previous = std::mem::replace(&mut session.url, url.clone());
        session.back.push(previous);
        session.forward.clear();
        session.title = url.clone();
        session.favicon = self.favicons.resolve(&url);
        session.loading = true;

        self.address = url.clone();
        history.append(url);
        self.revision += 1;
        Ok(Some(active))
    }

    /// Returns false when there is nothing to go back to.
    pub fn back(&mut self) -> Result<bool> {
        self.traverse(Direction::Back)
    }

    pub fn forward(&mut self) -> Result<bool> {
        self.traverse(Direction::Forward)
    }

    fn traverse(&mut self, direction: Direction) -> Result<bool> {
        let Some(active) = self.active else {
            return Ok(false);
        };
        let session = self.sessions.get_mut(&active).ok_or(BrowserError::NotFound(active))?;

        let (from, to) = match direction {
            Direction::Back => (&mut session.back, &mut session.forward),
            Direction::Forward => (&mut session.forward, &mut session.back),
        };
        let Some(target) = from.last().cloned() else {
            return Ok(false);
        };

        session.view.load(&self.relay.wrap(&target))?;
        session.subscription.begin_load();
        from.pop();
        let previous = std::mem::replace(&mut session.url, target.clone());
        to.push(previous);
        session.title = target.clone();
        session.favicon = self.favicons.resolve(&target);
        session.loading = true;

        self.address = target;
        self.revision += 1;
        Ok(true)
    }

    pub fn reload_active(&mut self) -> Result<bool> {
        let Some(active) = self.active else {
            return Ok(false);
        };
        let session = self.sessions.get_mut(&active).ok_or(BrowserError::NotFound(active))?;
        session.view.reload()?;
        session.subscription.begin_load();
        session.loading = true;
        self.revision += 1;
        Ok(true)
    }

    /// Applies a finished load to the session it belongs to. Events for
    /// sessions that were closed in the meantime, or for a load the session
    /// has since replaced, are dropped. Returns whether anything changed.
    pub fn complete_load(&mut self, event: LoadEvent) -> bool {
        let Some(session) = self.sessions.get_mut(&event.session) else {
            log::debug!("[Registry] Dropping load event for closed {}", event.session.label());
            return false;
        };
        let current = session.subscription.generation();
        if event.generation != current {
            log::debug!(
                "[Registry] Dropping load {} for {}, now at {}",
                event.generation,
                event.session.label(),
                current
            );
            return false;
        }

        session.loading = false;
        if let Some(title) = title::reconcile(&session.url, event.title) {
            session.title = title;
        }
        self.revision += 1;
        true
    }

    pub fn get(&self, id: SessionId) -> Result<&Session<H::Surface>> {
        self.sessions.get(&id).ok_or(BrowserError::NotFound(id))
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn position(&self, id: SessionId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    /// Sessions in strip order.
    pub fn sessions(&self) -> impl Iterator<Item = &Session<H::Surface>> + '_ {
        self.order.iter().filter_map(move |id| self.sessions.get(id))
    }

    pub fn ids(&self) -> &[SessionId] {
        &self.order
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active
    }

    pub fn active(&self) -> Option<&Session<H::Surface>> {
        self.active.and_then(|id| self.sessions.get(&id))
    }

    /// Contents of the address field.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Bumped on every observable change; the UI re-renders when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
