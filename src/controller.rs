//! Session controller: owns the single live session behind a UI.
//!
//! Every user action (cell click, reset, share) is handled synchronously
//! against the in-memory [`SessionState`], persisted through the
//! [`SessionStore`], and announced on the event channel so the render loop
//! knows to redraw. The only deferred work is expiry of the "copied"
//! confirmation, which the controller schedules and cancels itself.

use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use tictactoe_engine::{Position, Square};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::clipboard::Clipboard;
use crate::session::{SessionPhase, SessionState, SessionStore, SessionToken, build_share_link};

/// Messages from the controller to the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Session state changed; redraw.
    StateChanged,
    /// The "copied" confirmation raised as `generation` has run its course.
    CopiedExpired {
        /// Which raise this expiry belongs to.
        generation: u64,
    },
}

/// Controller settings derived from the application config.
#[derive(Debug, Clone, Getters, new)]
pub struct ControllerOptions {
    /// Page that share links point at.
    base_url: Url,
    /// Lifetime of the "copied" confirmation.
    copied_notice: Duration,
}

/// Transient "link copied" flag and the timer that lowers it.
#[derive(Debug)]
struct CopiedNotice {
    visible: bool,
    generation: u64,
    lifetime: Duration,
    timer: Option<JoinHandle<()>>,
}

impl CopiedNotice {
    fn new(lifetime: Duration) -> Self {
        Self {
            visible: false,
            generation: 0,
            lifetime,
            timer: None,
        }
    }

    /// Shows the flag and (re)starts its expiry; a pending expiry is aborted.
    fn raise(&mut self, events: &UnboundedSender<UiEvent>) {
        if let Some(timer) = self.timer.take() {
            debug!(generation = self.generation, "Cancelling pending copied expiry");
            timer.abort();
        }
        self.generation += 1;
        self.visible = true;

        let generation = self.generation;
        let lifetime = self.lifetime;
        let events = events.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if events.send(UiEvent::CopiedExpired { generation }).is_err() {
                debug!(generation, "Render loop gone before copied expiry");
            }
        }));
    }

    /// Lowers the flag if `generation` is the latest raise.
    fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            debug!(generation, current = self.generation, "Ignoring stale copied expiry");
            return false;
        }
        self.visible = false;
        self.timer = None;
        true
    }
}

impl Drop for CopiedNotice {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Everything a renderer needs, computed from the current session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameView {
    /// Squares in index order.
    cells: [Square; 9],
    /// Whether clicking each cell would place a mark.
    playable: [bool; 9],
    /// Indices of the winning triple.
    winning_line: Option<[usize; 3]>,
    /// Status line text.
    status: String,
    /// Winner banner text, shown only once someone has won.
    banner: Option<String>,
    /// Whether the "link copied" confirmation is up.
    copied: bool,
    /// Session phase.
    phase: SessionPhase,
    /// Session token.
    token: String,
    /// Share link for this session.
    share_link: String,
}

impl GameView {
    /// True if `index` belongs to the winning triple.
    pub fn is_winning(&self, index: usize) -> bool {
        self.winning_line
            .is_some_and(|line| line.contains(&index))
    }

    /// Label of the share control.
    pub fn share_label(&self) -> &'static str {
        if self.copied {
            "✓ Link Copied!"
        } else {
            "Share Game"
        }
    }
}

/// Drives one session for one UI instance.
pub struct SessionController {
    store: SessionStore,
    token: SessionToken,
    state: SessionState,
    share_link: Url,
    clipboard: Box<dyn Clipboard>,
    copied: CopiedNotice,
    events: UnboundedSender<UiEvent>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("token", &self.token)
            .field("state", &self.state)
            .field("copied", &self.copied)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Opens a session.
    ///
    /// With a token, its saved state is loaded, or a blank board is started
    /// under that token when nothing usable is stored. Without one, a fresh
    /// token is generated. Either way the state is saved straight away so
    /// the share link resolves.
    #[instrument(skip(store, options, clipboard, events))]
    pub fn open(
        mut store: SessionStore,
        token: Option<SessionToken>,
        options: ControllerOptions,
        clipboard: Box<dyn Clipboard>,
        events: UnboundedSender<UiEvent>,
    ) -> Self {
        let (token, state) = match token {
            Some(token) => {
                let state = store.load_session(&token).unwrap_or_else(|| {
                    info!(token = %token, "No saved state for token, starting a blank board");
                    SessionState::new()
                });
                (token, state)
            }
            None => (store.create_session(), SessionState::new()),
        };
        store.save_session(&token, &state);

        let share_link = build_share_link(options.base_url(), &token);
        info!(token = %token, phase = %state.phase(), link = %share_link, "Session opened");

        Self {
            store,
            token,
            state,
            share_link,
            clipboard,
            copied: CopiedNotice::new(*options.copied_notice()),
            events,
        }
    }

    /// Session token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Share link for this session.
    pub fn share_link(&self) -> &Url {
        &self.share_link
    }

    /// True once persistence has fallen back to memory.
    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    /// Plays the current mark at `index`.
    ///
    /// Occupied cells and decided games are ignored; nothing is persisted
    /// and no event is sent. Returns whether the move was made.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn click(&mut self, index: usize) -> bool {
        if !self.state.play(index) {
            return false;
        }
        self.persist();
        true
    }

    /// Clears the board in place, keeping the token.
    #[instrument(skip(self), fields(token = %self.token))]
    pub fn reset(&mut self) {
        info!("Resetting session");
        self.state.reset();
        self.persist();
    }

    /// Copies the share link to the clipboard and raises the "copied" flag.
    ///
    /// A failed clipboard write is logged and otherwise ignored. Returns the
    /// link either way.
    #[instrument(skip(self), fields(token = %self.token))]
    pub async fn share(&mut self) -> Url {
        let link = self.share_link.clone();
        match self.clipboard.write_text(link.as_str()).await {
            Ok(()) => {
                info!(link = %link, "Share link copied");
                self.copied.raise(&self.events);
                self.notify();
            }
            Err(e) => warn!(error = %e, "Could not copy share link"),
        }
        link
    }

    /// Applies an event from the channel. Returns whether a redraw is due.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::StateChanged => true,
            UiEvent::CopiedExpired { generation } => self.copied.expire(*generation),
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> GameView {
        let board = self.state.board();
        let result = self.state.evaluate();
        let decided = result.is_some();
        let cells = *board.squares();
        let playable = Position::ALL.map(|pos| !decided && board.is_empty(pos));

        GameView {
            cells,
            playable,
            winning_line: result.map(|r| r.indices()),
            status: self.state.status().to_string(),
            banner: result.map(|r| format!("Player {} Wins!", r.winner)),
            copied: self.copied.visible,
            phase: self.state.phase(),
            token: self.token.to_string(),
            share_link: self.share_link.to_string(),
        }
    }

    fn persist(&mut self) {
        self.store.save_session(&self.token, &self.state);
        self.notify();
    }

    fn notify(&self) {
        if self.events.send(UiEvent::StateChanged).is_err() {
            debug!("No render loop listening");
        }
    }
}
