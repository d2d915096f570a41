use crate::measurement::{MeasurementListener, MeasurementUpdate, UpdateKind};
use crate::tools::measure::MeasureTool;
use bevy::prelude::*;
use constants::measurement::{MEASUREMENT_COMPLETED_METHOD, MEASUREMENT_UPDATED_METHOD};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

impl RpcNotification {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        }
    }
}

/// Thread-safe queue of serialized notifications awaiting delivery.
#[derive(Resource, Clone, Default)]
pub struct FeedQueue(Arc<Mutex<Vec<String>>>);

impl FeedQueue {
    fn push(&self, message: String) {
        self.lock().push(message);
    }

    /// Take every queued message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Lock the queue, recovering it if a writer panicked while holding it.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.0.lock().unwrap_or_else(|poisoned| {
            error!("Measurement feed queue poisoned, recovering queued messages");
            poisoned.into_inner()
        })
    }
}

/// Listener turning every measurement update into a queued notification.
pub struct MeasurementFeed {
    queue: FeedQueue,
}

impl MeasurementFeed {
    pub fn new(queue: FeedQueue) -> Self {
        Self { queue }
    }
}

fn method_for(kind: UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Completed => MEASUREMENT_COMPLETED_METHOD,
        UpdateKind::PointAdded | UpdateKind::PointRemoved | UpdateKind::Cleared => {
            MEASUREMENT_UPDATED_METHOD
        }
    }
}

impl MeasurementListener for MeasurementFeed {
    fn on_update(&mut self, update: &MeasurementUpdate<'_>) {
        let method = method_for(update.kind);
        let params = match serde_json::to_value(update.result) {
            Ok(params) => params,
            Err(e) => {
                error!("Failed to serialize measurement for {}: {}", method, e);
                return;
            }
        };
        match serde_json::to_string(&RpcNotification::new(method, params)) {
            Ok(json) => self.queue.push(json),
            Err(e) => error!("Failed to serialize {} notification: {}", method, e),
        }
    }
}

/// Register the feed on the measure tool and expose its queue as a resource.
fn subscribe_measurement_feed(mut commands: Commands, mut measure_tool: ResMut<MeasureTool>) {
    let queue = FeedQueue::default();
    measure_tool.subscribe(MeasurementFeed::new(queue.clone()));
    commands.insert_resource(queue);
}

/// Deliver queued notifications to the embedding host.
fn send_outgoing_messages(queue: Option<Res<FeedQueue>>) {
    let Some(queue) = queue else {
        return;
    };
    for message in queue.drain() {
        info!("→ {}", message);
    }
}

/// Plugin pushing measurement notifications out of the engine.
pub struct MeasurementFeedPlugin;

impl Plugin for MeasurementFeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureTool>()
            .add_systems(Startup, subscribe_measurement_feed)
            .add_systems(Last, send_outgoing_messages);
    }
}
