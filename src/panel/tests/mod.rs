use std::time::Duration;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::scroll_linkage::ScrollLinkage;
use super::*;
use crate::input::{GestureSample, LayoutMetrics, ScrollSignal};


fn arbitrary_height() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.), Just(800.), 1f64..1400.]
}

fn arbitrary_state() -> impl Strategy<Value = PanelState> {
    prop_oneof![
        Just(PanelState::Expanded),
        Just(PanelState::Partial),
        Just(PanelState::Collapsed),
        Just(PanelState::Dismissed),
    ]
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Layout {
        #[proptest(strategy = "arbitrary_height()")]
        height: f64,
        #[proptest(strategy = "0f64..60.")]
        inset: f64,
    },
    Begin,
    Update(#[proptest(strategy = "-2000f64..2000.")] f64),
    End {
        #[proptest(strategy = "-200f64..200.")]
        delta: f64,
        #[proptest(strategy = "-1500f64..1500.")]
        velocity: f64,
    },
    Cancel,
    /// Sample delivered with a timestamp older than the last one.
    StaleUpdate(#[proptest(strategy = "-500f64..500.")] f64),
    Scroll {
        #[proptest(strategy = "-40f64..40.")]
        delta: f64,
        #[proptest(strategy = "-1000f64..1000.")]
        velocity: f64,
        #[proptest(strategy = "0f64..200.")]
        content_offset: f64,
    },
    RequestState(#[proptest(strategy = "arbitrary_state()")] PanelState),
    Dismiss,
}

struct TestPanel {
    panel: PanelStateMachine,
    linkage: ScrollLinkage,
    clock: Duration,
    events: Vec<PanelEvent>,
}

impl TestPanel {
    fn new(options: PanelOptions) -> Self {
        Self {
            panel: PanelStateMachine::new(options).unwrap(),
            linkage: ScrollLinkage::new(options.scroll_linkage),
            clock: Duration::ZERO,
            events: Vec::new(),
        }
    }

    fn tick(&mut self) -> Duration {
        self.clock += Duration::from_millis(16);
        self.clock
    }

    fn apply(&mut self, op: Op) {
        let ts = self.tick();
        match op {
            Op::Layout { height, inset } => {
                self.panel.set_layout(LayoutMetrics::new(height, inset));
            }
            Op::Begin => {
                self.panel.gesture_begin(GestureSample::began(ts));
            }
            Op::Update(delta) => {
                self.panel.gesture_update(GestureSample::changed(delta, ts));
            }
            Op::End { delta, velocity } => {
                let mut sample = GestureSample::ended(velocity, ts);
                sample.translation_delta = delta;
                self.panel.gesture_end(sample);
            }
            Op::Cancel => {
                self.panel.gesture_cancel();
            }
            Op::StaleUpdate(delta) => {
                let ts = ts.saturating_sub(Duration::from_millis(100));
                self.panel.gesture_update(GestureSample::changed(delta, ts));
            }
            Op::Scroll {
                delta,
                velocity,
                content_offset,
            } => {
                let signal = ScrollSignal {
                    content_offset,
                    delta,
                    velocity,
                    is_at_top: content_offset == 0.,
                    has_scrollable_content: true,
                };
                self.linkage.on_scroll(&signal, &mut self.panel);
            }
            Op::RequestState(state) => {
                self.panel.request_state(state);
            }
            Op::Dismiss => {
                self.panel.dismiss();
            }
        }

        self.events.extend(self.panel.take_events());
    }

    fn verify_invariants(&self) {
        let panel = &self.panel;

        let progress = panel.progress();
        assert!(
            (0. ..=1.).contains(&progress),
            "progress out of range: {progress}"
        );

        let dismissed = self
            .events
            .iter()
            .filter(|event| **event == PanelEvent::Dismissed)
            .count();
        assert!(dismissed <= 1, "dismissed {dismissed} times");
        assert_eq!(dismissed == 1, panel.is_dismissed());

        if panel.is_dismissed() {
            assert!(!panel.is_gesture_active());
            return;
        }

        let Some(metrics) = panel.metrics() else {
            assert!(!panel.is_gesture_active());
            assert_eq!(progress, 0.);
            return;
        };

        let offset = panel.offset().unwrap();
        assert!(
            metrics.expanded <= offset && offset <= metrics.dismiss_threshold,
            "offset {offset} outside of {metrics:?}"
        );
        assert_eq!(progress, metrics.progress(offset));

        if !panel.is_gesture_active() {
            assert_eq!(Some(offset), panel.anchor_offset(panel.state()));
        }
    }
}

#[track_caller]
fn check_ops_with_options(options: PanelOptions, ops: impl IntoIterator<Item = Op>) -> TestPanel {
    let mut panel = TestPanel::new(options);
    for op in ops {
        panel.apply(op);
        panel.verify_invariants();
    }
    panel
}

/// Options with round anchors: on an 800 high container, partial sits at 200 and the drag band
/// ends at 300.
fn test_options() -> PanelOptions {
    let mut options = PanelOptions::default();
    options.panel.top_height_ratio = 0.25;
    options.panel.dismiss_margin = 100.;
    options
}

#[track_caller]
fn check_ops(ops: impl IntoIterator<Item = Op>) -> TestPanel {
    check_ops_with_options(test_options(), ops)
}

fn arbitrary_options() -> impl Strategy<Value = PanelOptions> {
    (
        0.05f64..0.95,
        0f64..40.,
        50f64..300.,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_flat_map(|(ratio, padding, margin, allow_collapsed, linkage)| {
            (1f64..=margin).prop_map(move |distance| {
                let mut options = PanelOptions::default();
                options.panel.top_height_ratio = ratio;
                options.panel.expanded_padding = padding;
                options.panel.dismiss_margin = margin;
                options.panel.allow_collapsed = allow_collapsed;
                options.release.dismiss_distance = distance;
                options.scroll_linkage.enabled = linkage;
                options
            })
        })
}

#[test]
fn update_without_begin_is_ignored() {
    let panel = check_ops([
        Op::Layout {
            height: 800.,
            inset: 0.,
        },
        Op::Update(100.),
    ]);
    assert!(!panel.panel.is_gesture_active());
    assert_eq!(panel.panel.state(), PanelState::Partial);
    assert_eq!(panel.panel.offset(), Some(200.));
}

#[test]
fn gestures_wait_for_layout() {
    let mut panel = check_ops([Op::Begin, Op::Update(50.)]);
    assert!(!panel.panel.is_gesture_active());
    assert_eq!(panel.panel.offset(), None);
    assert!(panel.events.is_empty());

    panel.apply(Op::Layout {
        height: 800.,
        inset: 0.,
    });
    panel.apply(Op::Begin);
    assert!(panel.panel.is_gesture_active());
}

#[test]
fn losing_height_cancels_drag() {
    let mut panel = check_ops([
        Op::Layout {
            height: 800.,
            inset: 0.,
        },
        Op::Begin,
        Op::Update(60.),
        Op::Layout {
            height: 0.,
            inset: 0.,
        },
    ]);
    assert!(!panel.panel.is_gesture_active());
    assert_eq!(panel.panel.state(), PanelState::Partial);
    assert_eq!(panel.panel.offset(), Some(200.));
    assert_eq!(panel.panel.progress(), 0.);

    panel.apply(Op::Update(-40.));
    panel.apply(Op::Layout {
        height: 800.,
        inset: 0.,
    });
    panel.verify_invariants();
    assert!(!panel.panel.is_gesture_active());
    assert_eq!(panel.panel.offset(), Some(200.));
}

#[test]
fn stale_update_is_ignored() {
    let panel = check_ops([
        Op::Layout {
            height: 800.,
            inset: 0.,
        },
        Op::Begin,
        Op::Update(30.),
        Op::StaleUpdate(100.),
    ]);
    assert_eq!(panel.panel.offset(), Some(230.));
}

#[test]
fn collapsed_only_when_allowed() {
    let layout = Op::Layout {
        height: 800.,
        inset: 0.,
    };

    let panel = check_ops([layout, Op::RequestState(PanelState::Collapsed)]);
    assert_eq!(panel.panel.state(), PanelState::Partial);

    let mut options = test_options();
    options.panel.allow_collapsed = true;
    let panel = check_ops_with_options(options, [layout, Op::RequestState(PanelState::Collapsed)]);
    assert_eq!(panel.panel.state(), PanelState::Collapsed);
    assert_eq!(panel.panel.offset(), Some(200.));
}

#[test]
fn request_state_cannot_dismiss() {
    let panel = check_ops([
        Op::Layout {
            height: 800.,
            inset: 0.,
        },
        Op::RequestState(PanelState::Dismissed),
    ]);
    assert!(!panel.panel.is_dismissed());
}

#[test]
fn layout_change_moves_resting_panel() {
    let panel = check_ops([
        Op::Layout {
            height: 800.,
            inset: 0.,
        },
        Op::RequestState(PanelState::Expanded),
        Op::Layout {
            height: 800.,
            inset: 47.,
        },
    ]);
    assert_eq!(panel.panel.offset(), Some(47.));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_operations_dont_panic(ops: Vec<Op>) {
        check_ops(ops);
    }

    #[test]
    fn random_operations_with_options(
        options in arbitrary_options(),
        ops in proptest::collection::vec(any::<Op>(), 0..40),
    ) {
        check_ops_with_options(options, ops);
    }

    #[test]
    fn cancel_restores_anchor(
        start in prop_oneof![Just(PanelState::Expanded), Just(PanelState::Partial)],
        deltas in proptest::collection::vec(-2000f64..2000., 0..20),
    ) {
        let mut ops = vec![
            Op::Layout { height: 800., inset: 20. },
            Op::RequestState(start),
            Op::Begin,
        ];
        ops.extend(deltas.into_iter().map(Op::Update));
        ops.push(Op::Cancel);

        let panel = check_ops(ops);
        prop_assert_eq!(panel.panel.state(), start);
        prop_assert_eq!(panel.panel.offset(), panel.panel.anchor_offset(start));
        prop_assert!(!panel.panel.is_gesture_active());
    }

    #[test]
    fn dismissal_is_terminal(ops in proptest::collection::vec(any::<Op>(), 0..40)) {
        let mut panel = check_ops([
            Op::Layout { height: 800., inset: 0. },
            Op::Dismiss,
        ]);
        let before = panel.events.len();

        for op in ops {
            panel.apply(op);
            panel.verify_invariants();
        }

        prop_assert!(panel.panel.is_dismissed());
        prop_assert_eq!(panel.events.len(), before);
    }

    #[test]
    fn drag_never_changes_state(deltas in proptest::collection::vec(-2000f64..2000., 0..20)) {
        let mut ops = vec![Op::Layout { height: 800., inset: 0. }, Op::Begin];
        ops.extend(deltas.into_iter().map(Op::Update));

        let panel = check_ops(ops);
        prop_assert_eq!(panel.panel.state(), PanelState::Partial);
        let state_changed = panel
            .events
            .iter()
            .any(|event| matches!(event, PanelEvent::StateChanged { .. }));
        prop_assert!(!state_changed);
    }
}
