//! Outbound dashboard event queue
//!
//! State-changing operations append events here. A transport layer drains
//! the queue and broadcasts to subscribed clients.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use shared::{Alert, AlertBatch, AlertSeverity, DashboardEvent};

/// Cloneable handle to a shared FIFO of dashboard events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Arc<Mutex<VecDeque<DashboardEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: DashboardEvent) {
        tracing::debug!(event_type = event.event_type(), "Event published");
        self.lock().push_back(event);
    }

    /// Publish one `new_alert` event for an evaluation pass; nothing when there are no alerts
    pub fn publish_alerts(&self, alerts: &[Alert]) {
        if alerts.is_empty() {
            return;
        }
        let critical_count = alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .count();
        self.publish(DashboardEvent::NewAlert(AlertBatch {
            alerts: alerts.to_vec(),
            critical_count,
        }));
    }

    /// Remove and return all queued events in publish order
    pub fn drain(&self) -> Vec<DashboardEvent> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A poisoned lock still holds a consistent queue; recover it
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<DashboardEvent>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
