use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use statesync_domain::{Result, SyncError};

use crate::ui::{ElementRef, Selector, UiHandle};

/// One call made against a [`ScriptedUi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    IsVisible(Selector),
    IsAttached(Selector),
    IsHidden(Selector),
    Click(Selector),
    TypeText(Selector, String),
    Text(Selector),
    Count(Selector),
    NetworkIdle,
}

#[derive(Default)]
struct CountScript {
    queue: VecDeque<usize>,
    last: usize,
}

#[derive(Default)]
struct State {
    calls: Vec<UiCall>,
    hidden: HashSet<Selector>,
    detached: HashSet<Selector>,
    stuck: HashSet<Selector>,
    texts: HashMap<Selector, String>,
    counts: HashMap<Selector, CountScript>,
    on_click: HashMap<Selector, (Selector, usize)>,
    failures: HashMap<Selector, String>,
}

/// [`UiHandle`] fake with a scriptable page.
///
/// Every element is visible, attached and hides promptly unless scripted
/// otherwise. Counts are served from a per-selector queue; once the queue is
/// drained the last served value repeats (0 if none).
#[derive(Default)]
pub struct ScriptedUi {
    state: Mutex<State>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `is_visible` reports `false` for `selector`.
    pub fn hide(&self, selector: Selector) {
        self.state().hidden.insert(selector);
    }

    /// `is_attached` reports `false` for `selector`.
    pub fn detach(&self, selector: Selector) {
        self.state().detached.insert(selector);
    }

    /// `is_hidden` reports `false` for `selector`.
    pub fn stick(&self, selector: Selector) {
        self.state().stuck.insert(selector);
    }

    pub fn set_text(&self, selector: Selector, text: impl Into<String>) {
        self.state().texts.insert(selector, text.into());
    }

    /// Queue the values `count` returns for `selector`, one per call.
    pub fn script_counts(&self, selector: Selector, counts: impl IntoIterator<Item = usize>) {
        self.state().counts.entry(selector).or_default().queue.extend(counts);
    }

    /// After a click on `clicked`, `count` on `target` returns `count` from
    /// then on.
    pub fn on_click_set_count(&self, clicked: Selector, target: Selector, count: usize) {
        self.state().on_click.insert(clicked, (target, count));
    }

    /// Every call on `selector` fails with a driver error.
    pub fn fail_on(&self, selector: Selector, message: impl Into<String>) {
        self.state().failures.insert(selector, message.into());
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.state().calls.clone()
    }

    pub fn clicks(&self, selector: &Selector) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| matches!(call, UiCall::Click(s) if s == selector))
            .count()
    }

    pub fn count_calls(&self, selector: &Selector) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| matches!(call, UiCall::Count(s) if s == selector))
            .count()
    }

    /// Record `call` and return the scripted failure for `element`, if any.
    fn record(&self, call: UiCall, element: &ElementRef) -> Result<MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(call);
        if let Some(message) = state.failures.get(element.selector()) {
            return Err(SyncError::Driver(message.clone()));
        }
        Ok(state)
    }
}

#[async_trait]
impl UiHandle for ScriptedUi {
    async fn is_visible(&self, element: &ElementRef, _timeout: Duration) -> Result<bool> {
        let state = self.record(UiCall::IsVisible(element.selector().clone()), element)?;
        Ok(!state.hidden.contains(element.selector()))
    }

    async fn is_attached(&self, element: &ElementRef, _timeout: Duration) -> Result<bool> {
        let state = self.record(UiCall::IsAttached(element.selector().clone()), element)?;
        Ok(!state.detached.contains(element.selector()))
    }

    async fn is_hidden(&self, element: &ElementRef, _timeout: Duration) -> Result<bool> {
        let state = self.record(UiCall::IsHidden(element.selector().clone()), element)?;
        Ok(!state.stuck.contains(element.selector()))
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        let mut state = self.record(UiCall::Click(element.selector().clone()), element)?;
        if let Some((target, count)) = state.on_click.get(element.selector()).cloned() {
            let script = state.counts.entry(target).or_default();
            script.queue.clear();
            script.last = count;
        }
        Ok(())
    }

    async fn type_text(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.record(UiCall::TypeText(element.selector().clone(), text.to_string()), element)?;
        Ok(())
    }

    async fn text(&self, element: &ElementRef) -> Result<String> {
        let state = self.record(UiCall::Text(element.selector().clone()), element)?;
        Ok(state.texts.get(element.selector()).cloned().unwrap_or_default())
    }

    async fn count(&self, element: &ElementRef) -> Result<usize> {
        let mut state = self.record(UiCall::Count(element.selector().clone()), element)?;
        let script = state.counts.entry(element.selector().clone()).or_default();
        if let Some(next) = script.queue.pop_front() {
            script.last = next;
        }
        Ok(script.last)
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        self.state().calls.push(UiCall::NetworkIdle);
        Ok(())
    }
}
