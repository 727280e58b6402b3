//! One presentation of the sliding panel.
//!
//! The session owns the state machine and everything that listens to it. Input goes in through
//! [`PanelSession::process`]; after every input the queued panel events are fanned out
//! synchronously to the rendered view, the preview effects, the registered listeners and, on
//! dismissal, the dismiss sink.

use tracing::debug;

use crate::input::{InputEvent, LayoutProvider};
use crate::panel::effects::{EffectBroadcaster, EffectSink, PreviewEffect};
use crate::panel::scroll_linkage::ScrollLinkage;
use crate::panel::view::PanelView;
use crate::panel::{
    ConfigError, DismissSink, PanelEvent, PanelListener, PanelOptions, PanelState,
    PanelStateMachine,
};

pub struct PanelSession {
    panel: PanelStateMachine,
    linkage: ScrollLinkage,
    effects: EffectBroadcaster,
    view: PanelView,
    listeners: Vec<Box<dyn PanelListener>>,
    dismiss_sink: Option<Box<dyn DismissSink>>,
    torn_down: bool,
}

impl std::fmt::Debug for PanelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSession")
            .field("panel", &self.panel)
            .field("linkage", &self.linkage)
            .field("effects", &self.effects)
            .field("view", &self.view)
            .field("listeners", &self.listeners.len())
            .field("dismiss_sink", &self.dismiss_sink.is_some())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl PanelSession {
    pub fn new(options: PanelOptions) -> Result<Self, ConfigError> {
        let panel = PanelStateMachine::new(options)?;

        Ok(Self {
            linkage: ScrollLinkage::new(options.scroll_linkage),
            effects: EffectBroadcaster::new(options.preview_effect),
            panel,
            view: PanelView::new(),
            listeners: Vec::new(),
            dismiss_sink: None,
            torn_down: false,
        })
    }

    pub fn panel(&self) -> &PanelStateMachine {
        &self.panel
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn preview_effect(&self) -> PreviewEffect {
        self.effects.current()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn add_listener(&mut self, listener: impl PanelListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn subscribe_effects(&mut self, sink: impl EffectSink + 'static) {
        self.effects.subscribe(Box::new(sink));
    }

    /// Sets the callback that closes the picker. It runs at most once.
    pub fn set_dismiss_sink(&mut self, sink: impl DismissSink + 'static) {
        self.dismiss_sink = Some(Box::new(sink));
    }

    pub fn set_scroll_linkage_enabled(&mut self, enabled: bool) {
        self.linkage.set_enabled(enabled);
    }

    /// Handles one input event. Returns whether it had any effect on the panel.
    pub fn process(&mut self, event: InputEvent) -> bool {
        if self.torn_down {
            return false;
        }

        let handled = match event {
            InputEvent::Layout(layout) => {
                self.panel.set_layout(layout);
                true
            }
            InputEvent::Gesture(sample) => self.panel.handle_gesture(sample),
            InputEvent::Scroll(signal) => self.linkage.on_scroll(&signal, &mut self.panel),
        };

        self.flush();
        handled
    }

    /// Handles events in order until the source runs dry.
    pub fn process_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.process(event);
        }
    }

    pub fn sync_layout(&mut self, provider: &impl LayoutProvider) {
        self.process(InputEvent::Layout(provider.layout_metrics()));
    }

    pub fn request_state(&mut self, target: PanelState) -> bool {
        if self.torn_down {
            return false;
        }

        let changed = self.panel.request_state(target);
        self.flush();
        changed
    }

    pub fn dismiss(&mut self) -> bool {
        if self.torn_down {
            return false;
        }

        let dismissed = self.panel.dismiss();
        self.flush();
        dismissed
    }

    /// Ends the session when the panel is removed, cancelling any in-flight drag.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        if self.panel.gesture_cancel() {
            debug!("cancelled an active drag on teardown");
        }
        self.flush();
        self.torn_down = true;
    }

    fn flush(&mut self) {
        for event in self.panel.take_events() {
            self.view.apply(&event);

            if let PanelEvent::ProgressChanged { progress } = event {
                self.effects.publish(progress);
            }

            for listener in &mut self.listeners {
                listener.on_panel_event(&event);
            }

            if event == PanelEvent::Dismissed {
                if let Some(mut sink) = self.dismiss_sink.take() {
                    sink.on_dismiss();
                }
            }
        }
    }
}
