use anyhow::Result;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use picklist_models::PickList;

pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    lines_generated: IntCounter,
    degraded_lookups: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new_custom(Some("picklist".to_string()), None)?;

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "Pick-list requests by outcome"),
            &["endpoint", "outcome"],
        )?;
        let lines_generated = IntCounter::new("lines_generated_total", "Pick-list lines produced")?;
        let degraded_lookups = IntCounterVec::new(
            Opts::new("degraded_lookups_total", "Lookups that fell back to a default"),
            &["source"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(lines_generated.clone()))?;
        registry.register(Box::new(degraded_lookups.clone()))?;

        Ok(Self {
            registry,
            requests,
            lines_generated,
            degraded_lookups,
        })
    }

    pub fn record_request(&self, endpoint: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        self.requests.with_label_values(&[endpoint, outcome]).inc();
    }

    pub fn record_pick_list(&self, pick_list: &PickList) {
        self.lines_generated.inc_by(pick_list.lines.len() as u64);
        for warning in &pick_list.warnings {
            self.degraded_lookups
                .with_label_values(&[warning.source.as_str()])
                .inc();
        }
    }

    pub fn render(&self) -> String {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .unwrap_or_else(|_| "Error encoding metrics".to_string())
    }
}
