//! Process metrics for seglog services.
//!
//! A small pull-style metric set: monotone [`Counter`]s and up/down
//! [`Gauge`]s registered on an explicit [`Registry`] that renders them as
//! plain text (one `name value` line per metric, for scrape endpoints) or
//! as an HTML table (for humans). The registry is a value, not a process
//! global: services own one and thread it to whatever serves the export
//! endpoint.
//!
//! The record codec deliberately has no dependency on this crate.

use std::io::{self, Write};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A metric that can render itself for export.
pub trait Metric: Send + Sync {
    fn name(&self) -> &str;
    fn help(&self) -> &str;
    /// One-line text form: `name value`.
    fn export_text(&self) -> String;
}

/// Monotonically increasing counter.
pub struct Counter {
    name: String,
    help: String,
    value: AtomicU64,
}

impl Counter {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            help: help.into(),
            value: AtomicU64::new(0),
        })
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Metric for Counter {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn export_text(&self) -> String {
        format!("{} {}", self.name, self.get())
    }
}

/// Gauge that can move in both directions.
pub struct Gauge {
    name: String,
    help: String,
    value: AtomicI64,
}

impl Gauge {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            help: help.into(),
            value: AtomicI64::new(0),
        })
    }

    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Metric for Gauge {
    fn name(&self) -> &str {
        &self.name
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn export_text(&self) -> String {
        format!("{} {}", self.name, self.get())
    }
}

/// Explicit registry of exported metrics.
///
/// Registration order is export order. Metrics stay alive as long as the
/// registry holds them, so callers keep their own `Arc` for updating.
#[derive(Default)]
pub struct Registry {
    metrics: RwLock<Vec<Arc<dyn Metric>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, metric: Arc<dyn Metric>) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.push(metric);
        }
    }

    pub fn len(&self) -> usize {
        self.metrics.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain-text export: `# HELP` comment then `name value`, per metric.
    pub fn export(&self, out: &mut impl Write) -> io::Result<()> {
        let Ok(metrics) = self.metrics.read() else {
            return Ok(());
        };
        for metric in metrics.iter() {
            writeln!(out, "# HELP {} {}", metric.name(), metric.help())?;
            writeln!(out, "{}", metric.export_text())?;
        }
        Ok(())
    }

    /// HTML table export for a human-facing status page.
    pub fn export_html(&self, out: &mut impl Write) -> io::Result<()> {
        let Ok(metrics) = self.metrics.read() else {
            return Ok(());
        };
        writeln!(out, "<html>\n<body>\n  <h1>Metrics</h1>\n<table>")?;
        for (i, metric) in metrics.iter().enumerate() {
            let shade = if i % 2 == 0 { "eeffee" } else { "bbffbb" };
            writeln!(
                out,
                "<tr><td style='background-color:#{}'><code>{}</code></td></tr>",
                shade,
                metric.export_text()
            )?;
        }
        writeln!(out, "</table>\n</body>\n</html>")?;
        Ok(())
    }

    /// JSON object keyed by metric name.
    pub fn to_json(&self) -> serde_json::Value {
        let Ok(metrics) = self.metrics.read() else {
            return serde_json::Value::Null;
        };
        let mut map = serde_json::Map::new();
        for metric in metrics.iter() {
            let rendered = metric.export_text();
            let value = rendered
                .rsplit(' ')
                .next()
                .and_then(|v| v.parse::<i64>().ok())
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null);
            map.insert(metric.name().to_string(), value);
        }
        serde_json::Value::Object(map)
    }
}
