//! Metrics sink boundary.
//!
//! This module is the only bridge between translation/evaluation logic and
//! the thread-local metrics state.
use crate::{obs::metrics, operator::CriteriaOperator};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Translate {
        entity_path: &'static str,
        ok: bool,
    },
    ConstantFold,
    ComparatorReversal,
    CanonicalRewrite {
        from: CriteriaOperator,
        to: CriteriaOperator,
    },
    Evaluate {
        ok: bool,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Translate { entity_path, ok } => {
                metrics::with_state_mut(|m| {
                    m.ops.translations = m.ops.translations.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.translations = entry.translations.saturating_add(1);

                    if !ok {
                        m.ops.translation_errors = m.ops.translation_errors.saturating_add(1);
                        entry.translation_errors = entry.translation_errors.saturating_add(1);
                    }
                });
            }

            MetricsEvent::ConstantFold => {
                metrics::with_state_mut(|m| {
                    m.ops.constant_folds = m.ops.constant_folds.saturating_add(1);
                });
            }

            MetricsEvent::ComparatorReversal => {
                metrics::with_state_mut(|m| {
                    m.ops.comparator_reversals = m.ops.comparator_reversals.saturating_add(1);
                });
            }

            MetricsEvent::CanonicalRewrite { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.canonical_rewrites = m.ops.canonical_rewrites.saturating_add(1);
                });
            }

            MetricsEvent::Evaluate { ok } => {
                metrics::with_state_mut(|m| {
                    m.ops.evaluations = m.ops.evaluations.saturating_add(1);
                    if !ok {
                        m.ops.evaluation_errors = m.ops.evaluation_errors.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn override_captures_and_restores() {
        metrics_reset_all();
        let sink = Rc::new(CaptureSink::default());

        with_metrics_sink(sink.clone(), || {
            record(MetricsEvent::ConstantFold);
            record(MetricsEvent::Evaluate { ok: false });
        });

        assert_eq!(
            *sink.events.borrow(),
            vec![
                MetricsEvent::ConstantFold,
                MetricsEvent::Evaluate { ok: false }
            ]
        );
        assert_eq!(metrics_report().ops.constant_folds, 0);

        record(MetricsEvent::ConstantFold);
        assert_eq!(metrics_report().ops.constant_folds, 1);
    }

    #[test]
    fn global_sink_tracks_entities_and_errors() {
        metrics_reset_all();

        record(MetricsEvent::Translate {
            entity_path: "test::Product",
            ok: true,
        });
        record(MetricsEvent::Translate {
            entity_path: "test::Product",
            ok: false,
        });

        let report = metrics_report();
        assert_eq!(report.ops.translations, 2);
        assert_eq!(report.ops.translation_errors, 1);

        let entity = &report.entities["test::Product"];
        assert_eq!(entity.translations, 2);
        assert_eq!(entity.translation_errors, 1);
    }

    #[test]
    fn nested_override_restores_outer_sink() {
        let outer = Rc::new(CaptureSink::default());
        let inner = Rc::new(CaptureSink::default());

        with_metrics_sink(outer.clone(), || {
            with_metrics_sink(inner.clone(), || record(MetricsEvent::ConstantFold));
            record(MetricsEvent::ComparatorReversal);
        });

        assert_eq!(*inner.events.borrow(), vec![MetricsEvent::ConstantFold]);
        assert_eq!(
            *outer.events.borrow(),
            vec![MetricsEvent::ComparatorReversal]
        );
    }
}
