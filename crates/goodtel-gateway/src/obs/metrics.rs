//! In-process request metrics for the gateway.
//!
//! Counters and histograms keyed by label sets stored in `DashMap`. Label
//! pairs are sorted into the key so rendering order is stable per series.
//! Histogram buckets are integer microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_labels(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

// 50us .. 5s
const BUCKETS_MICROS: [u64; 8] = [50, 250, 1_000, 5_000, 25_000, 100_000, 1_000_000, 5_000_000];

#[derive(Default)]
struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 8],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, Histogram>,
}

impl HistogramVec {
    pub fn observe(&self, labels: &[(&str, &str)], elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let hist = self.map.entry(label_key(labels)).or_default();

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} histogram");
        for r in self.map.iter() {
            let hist = r.value();
            let labels = render_labels(r.key());
            let prefix = if labels.is_empty() { String::new() } else { format!("{labels},") };

            for (bucket, le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    name,
                    prefix,
                    le,
                    bucket.load(Ordering::Relaxed)
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    /// outcome = ok | rejected | upstream_error
    pub evaluations: CounterVec,
    /// code = client code of the decode error
    pub decode_errors: CounterVec,
    /// level = cardinality level of successful evaluations
    pub cardinality_levels: CounterVec,
    /// idiom = tag of each flagged label
    pub flagged_labels: CounterVec,
    pub evaluate_duration: HistogramVec,
    pub review_duration: HistogramVec,
}

impl GatewayMetrics {
    /// Render everything in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.evaluations
            .render("goodtel_evaluations_total", "Evaluation requests by outcome.", &mut out);
        self.decode_errors
            .render("goodtel_decode_errors_total", "Rejected inputs by error code.", &mut out);
        self.cardinality_levels.render(
            "goodtel_cardinality_level_total",
            "Successful evaluations by cardinality level.",
            &mut out,
        );
        self.flagged_labels.render(
            "goodtel_flagged_labels_total",
            "Labels flagged as unbounded, by idiom.",
            &mut out,
        );
        self.evaluate_duration.render(
            "goodtel_evaluate_duration_micros",
            "Time spent decoding and estimating.",
            &mut out,
        );
        self.review_duration.render(
            "goodtel_review_duration_micros",
            "Time spent waiting for the reviewer backend.",
            &mut out,
        );
        out
    }
}
