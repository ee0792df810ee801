pub mod directory;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod selector;

use std::sync::Arc;

use shared::{
    domain::GuestKey,
    protocol::{AttendanceEntry, ConfirmationEnvelope},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::{
    directory::Directory,
    error::{ConfirmError, LoadError, SelectionError, ValidationError},
    flow::{
        AcknowledgmentFlow, AcknowledgmentSurface, FlowState, MissingAcknowledgmentSurface,
        MissingNavigator, Navigator,
    },
    gateway::DirectoryGateway,
    selector::{MissingSelector, SearchableSelector, SelectorOption},
};

/// One checkbox row of the household view. The list is rebuilt wholesale on
/// every selection change; `checked` starts from the directory and then
/// follows user toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistRow {
    pub id: GuestKey,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Single-line, user-visible status. Every caught error ends up here; none
/// propagate past the operation that raised them.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub severity: Severity,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// State changes broadcast to whatever front-end is observing the client.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    DirectoryLoaded { guest_count: usize },
    SelectionCleared,
    HouseholdRendered {
        household: String,
        rows: Vec<ChecklistRow>,
    },
    StatusChanged(Option<StatusLine>),
    SubmitEnabled(bool),
    AcknowledgmentShown,
    FlowDone,
}

struct RsvpState {
    directory: Option<Directory>,
    load_failed: bool,
    selection: Option<GuestKey>,
    checklist: Vec<ChecklistRow>,
    submit_enabled: bool,
    submit_in_flight: bool,
    status: Option<StatusLine>,
    flow: Option<AcknowledgmentFlow>,
}

impl RsvpState {
    fn new() -> Self {
        Self {
            directory: None,
            load_failed: false,
            selection: None,
            checklist: Vec::new(),
            submit_enabled: false,
            submit_in_flight: false,
            status: None,
            flow: None,
        }
    }
}

/// Owns the whole confirmation workflow: directory loading, selection,
/// the household checklist, submission and the acknowledgment flow. All
/// mutable state lives behind one lock; UI events and network completions
/// interleave on it without concurrent mutation.
pub struct RsvpClient {
    gateway: Arc<dyn DirectoryGateway>,
    selector: Mutex<Box<dyn SearchableSelector>>,
    surface: Arc<dyn AcknowledgmentSurface>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<RsvpState>,
    events: broadcast::Sender<ClientEvent>,
}

impl RsvpClient {
    pub fn new(gateway: Arc<dyn DirectoryGateway>) -> Arc<Self> {
        Self::new_with_dependencies(
            gateway,
            Box::new(MissingSelector),
            Arc::new(MissingAcknowledgmentSurface),
            Arc::new(MissingNavigator),
        )
    }

    pub fn new_with_dependencies(
        gateway: Arc<dyn DirectoryGateway>,
        selector: Box<dyn SearchableSelector>,
        surface: Arc<dyn AcknowledgmentSurface>,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            gateway,
            selector: Mutex::new(selector),
            surface,
            navigator,
            inner: Mutex::new(RsvpState::new()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// First directory load. A failure here is terminal for the page
    /// lifetime: selection and submission stay disabled until `reload`.
    pub async fn initialize(&self) -> Result<(), LoadError> {
        self.load_directory().await
    }

    /// Full rebuild: drops the directory, selection and checklist, then
    /// loads again and repopulates the selector.
    pub async fn reload(&self) -> Result<(), LoadError> {
        {
            let mut state = self.inner.lock().await;
            state.directory = None;
            state.load_failed = false;
            state.selection = None;
            state.checklist.clear();
            state.flow = None;
            self.set_submit_enabled(&mut state, false);
        }
        self.load_directory().await
    }

    /// Tears the selector down and clears all workflow state.
    pub async fn dispose(&self) {
        {
            let mut selector = self.selector.lock().await;
            selector.dispose();
        }
        let mut state = self.inner.lock().await;
        state.directory = None;
        state.selection = None;
        state.checklist.clear();
        state.flow = None;
        self.set_submit_enabled(&mut state, false);
        self.set_status(&mut state, None);
    }

    async fn load_directory(&self) -> Result<(), LoadError> {
        {
            let mut state = self.inner.lock().await;
            self.set_submit_enabled(&mut state, false);
            self.set_status(&mut state, Some(StatusLine::info("Carregando convidados…")));
        }

        let result = match self.gateway.fetch_guests().await {
            Ok(records) => Directory::build(records),
            Err(err) => Err(err),
        };

        match result {
            Ok(directory) => {
                let options: Vec<SelectorOption> = directory
                    .guests()
                    .iter()
                    .map(|guest| SelectorOption {
                        value: guest.id.clone(),
                        label: guest.name.clone(),
                        household: guest.household.clone(),
                    })
                    .collect();
                let guest_count = directory.len();

                {
                    let mut state = self.inner.lock().await;
                    state.directory = Some(directory);
                    state.load_failed = false;
                    self.set_status(&mut state, None);
                }
                {
                    let mut selector = self.selector.lock().await;
                    selector.populate(&options);
                }

                info!(guest_count, "guest directory loaded");
                let _ = self.events.send(ClientEvent::DirectoryLoaded { guest_count });
                Ok(())
            }
            Err(err) => {
                error!(%err, "guest directory load failed");
                let text = match err {
                    LoadError::Empty => "Nenhum convidado encontrado.",
                    _ => "Não foi possível carregar a lista. Recarregue a página.",
                };
                let mut state = self.inner.lock().await;
                state.directory = None;
                state.load_failed = true;
                self.set_status(&mut state, Some(StatusLine::error(text)));
                Err(err)
            }
        }
    }

    /// Reacts to a change notification from the search widget. An empty raw
    /// value means the widget was cleared.
    pub async fn on_select(&self, raw: &str) -> Result<(), SelectionError> {
        let mut state = self.inner.lock().await;
        if state.load_failed || state.directory.is_none() {
            // A failed load leaves selection dead until reload.
            return Ok(());
        }

        if raw.is_empty() {
            state.selection = None;
            state.checklist.clear();
            self.set_submit_enabled(&mut state, false);
            self.set_status(&mut state, None);
            let _ = self.events.send(ClientEvent::SelectionCleared);
            return Ok(());
        }

        let resolved = state.directory.as_ref().and_then(|directory| {
            directory
                .resolve_raw(raw)
                .map(|guest| (guest.clone(), directory.household_of(guest)))
        });

        let Some((guest, members)) = resolved else {
            warn!(raw, "selected value does not resolve against directory");
            state.selection = None;
            state.checklist.clear();
            self.set_submit_enabled(&mut state, false);
            self.set_status(&mut state, Some(StatusLine::error("Convidado não encontrado.")));
            let _ = self.events.send(ClientEvent::SelectionCleared);
            return Err(SelectionError(raw.to_string()));
        };

        state.selection = Some(guest.id.clone());
        state.checklist = members
            .iter()
            .map(|member| ChecklistRow {
                id: member.id.clone(),
                label: member.name.clone(),
                checked: member.attending,
            })
            .collect();
        self.set_submit_enabled(&mut state, true);
        self.set_status(&mut state, None);
        let _ = self.events.send(ClientEvent::HouseholdRendered {
            household: guest.household.clone(),
            rows: state.checklist.clone(),
        });
        Ok(())
    }

    /// Applies a checkbox toggle reported back by the rendered household.
    /// Returns whether the row existed.
    pub async fn set_attending(&self, id: &GuestKey, checked: bool) -> bool {
        let mut state = self.inner.lock().await;
        match state.checklist.iter_mut().find(|row| &row.id == id) {
            Some(row) => {
                row.checked = checked;
                true
            }
            None => {
                warn!(%id, "toggle for a row that is not rendered");
                false
            }
        }
    }

    /// Builds the confirmation payload from the current checklist and sends
    /// it. A no-op when nothing is selected or a submission is already
    /// outstanding; on failure the submit control is re-enabled for a
    /// user-initiated retry, on success the acknowledgment flow takes over.
    pub async fn submit(&self) -> Result<(), ConfirmError> {
        let envelope = {
            let mut state = self.inner.lock().await;
            if state.selection.is_none() {
                return Ok(());
            }
            if state.submit_in_flight {
                warn!("ignoring submit while a confirmation is outstanding");
                return Ok(());
            }
            if state.checklist.is_empty() {
                self.set_status(
                    &mut state,
                    Some(StatusLine::error(
                        "Selecione pelo menos um convidado do grupo.",
                    )),
                );
                return Err(ValidationError.into());
            }

            state.submit_in_flight = true;
            self.set_submit_enabled(&mut state, false);
            self.set_status(
                &mut state,
                Some(StatusLine::info("Enviando sua confirmação…")),
            );
            ConfirmationEnvelope {
                info: state
                    .checklist
                    .iter()
                    .map(|row| AttendanceEntry {
                        id: row.id.clone(),
                        attending: row.checked,
                    })
                    .collect(),
            }
        };

        let result = self.gateway.submit_confirmation(&envelope).await;

        let mut state = self.inner.lock().await;
        state.submit_in_flight = false;
        match result {
            Ok(()) => {
                info!(entries = envelope.info.len(), "confirmation accepted");
                self.set_status(&mut state, None);

                let mut flow =
                    AcknowledgmentFlow::new(Arc::clone(&self.surface), Arc::clone(&self.navigator));
                let flow_state = flow.begin();
                state.flow = Some(flow);
                match flow_state {
                    FlowState::Shown => {
                        let _ = self.events.send(ClientEvent::AcknowledgmentShown);
                    }
                    FlowState::Done => {
                        self.set_status(&mut state, Some(StatusLine::success("Confirmação enviada!")));
                        let _ = self.events.send(ClientEvent::FlowDone);
                    }
                    FlowState::Idle => {}
                }
                Ok(())
            }
            Err(err) => {
                error!(%err, "confirmation submit failed");
                self.set_status(
                    &mut state,
                    Some(StatusLine::error(format!(
                        "Não foi possível enviar agora ({err}). Tente novamente em instantes."
                    ))),
                );
                self.set_submit_enabled(&mut state, true);
                Err(err.into())
            }
        }
    }

    /// One user activation of the acknowledgment's confirming control.
    pub async fn confirm_acknowledgment(&self) -> FlowState {
        let mut state = self.inner.lock().await;
        let Some(flow) = state.flow.as_mut() else {
            return FlowState::Idle;
        };
        let before = flow.state();
        let after = flow.confirm();
        if before == FlowState::Shown && after == FlowState::Done {
            let _ = self.events.send(ClientEvent::FlowDone);
        }
        after
    }

    pub async fn flow_state(&self) -> FlowState {
        self.inner
            .lock()
            .await
            .flow
            .as_ref()
            .map(AcknowledgmentFlow::state)
            .unwrap_or(FlowState::Idle)
    }

    pub async fn checklist(&self) -> Vec<ChecklistRow> {
        self.inner.lock().await.checklist.clone()
    }

    pub async fn selection(&self) -> Option<GuestKey> {
        self.inner.lock().await.selection.clone()
    }

    pub async fn status(&self) -> Option<StatusLine> {
        self.inner.lock().await.status.clone()
    }

    pub async fn submit_enabled(&self) -> bool {
        self.inner.lock().await.submit_enabled
    }

    pub async fn directory_loaded(&self) -> bool {
        self.inner.lock().await.directory.is_some()
    }

    fn set_status(&self, state: &mut RsvpState, status: Option<StatusLine>) {
        if state.status != status {
            state.status = status.clone();
            let _ = self.events.send(ClientEvent::StatusChanged(status));
        }
    }

    fn set_submit_enabled(&self, state: &mut RsvpState, enabled: bool) {
        if state.submit_enabled != enabled {
            state.submit_enabled = enabled;
            let _ = self.events.send(ClientEvent::SubmitEnabled(enabled));
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
