//! Simulator double and log capture shared by unit tests.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::description::ActorId;
use crate::episode::{Episode, Simulator};
use crate::error::RpcError;
use crate::settings::ClientSettings;

/// How [`RecordingSimulator`] answers destroy calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
	Succeed,
	Refuse,
	TimeOut,
	Fail,
	Panic,
}

/// Records every destroy call with the timeout it was given and answers per
/// [`Behavior`].
#[derive(Debug)]
pub(crate) struct RecordingSimulator {
	behavior: Behavior,
	calls: Mutex<Vec<(ActorId, Duration)>>,
}

impl RecordingSimulator {
	pub(crate) fn new(behavior: Behavior) -> Arc<Self> {
		Arc::new(Self {
			behavior,
			calls: Mutex::new(Vec::new()),
		})
	}

	/// Episode 1 with default settings, bound to a fresh recorder.
	pub(crate) fn episode(behavior: Behavior) -> (Arc<Episode>, Arc<Self>) {
		Self::episode_with(behavior, ClientSettings::default())
	}

	/// Episode 1 with `settings`, bound to a fresh recorder.
	pub(crate) fn episode_with(behavior: Behavior, settings: ClientSettings) -> (Arc<Episode>, Arc<Self>) {
		let simulator = Self::new(behavior);
		let episode = Episode::new(1, Arc::clone(&simulator) as Arc<dyn Simulator>, settings);
		(episode, simulator)
	}

	pub(crate) fn destroy_calls(&self) -> Vec<ActorId> {
		self.calls.lock().unwrap().iter().map(|(id, _)| *id).collect()
	}

	pub(crate) fn timeouts(&self) -> Vec<Duration> {
		self.calls.lock().unwrap().iter().map(|(_, timeout)| *timeout).collect()
	}
}

impl Simulator for RecordingSimulator {
	fn destroy_actor(&self, id: ActorId, timeout: Duration) -> Result<bool, RpcError> {
		self.calls.lock().unwrap().push((id, timeout));
		match self.behavior {
			Behavior::Succeed => Ok(true),
			Behavior::Refuse => Ok(false),
			Behavior::TimeOut => Err(RpcError::Timeout {
				call: "destroy_actor",
				timeout,
			}),
			Behavior::Fail => Err(RpcError::Remote("actor state corrupted".to_string())),
			Behavior::Panic => panic!("transport invariant violated"),
		}
	}
}

/// One captured `tracing` event.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedEvent {
	pub(crate) level: Option<Level>,
	pub(crate) message: String,
	pub(crate) actor: Option<String>,
	pub(crate) error: Option<String>,
}

#[derive(Default)]
struct EventVisitor(CapturedEvent);

impl Visit for EventVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		match field.name() {
			"message" => self.0.message = value.to_string(),
			"actor" => self.0.actor = Some(value.to_string()),
			"error" => self.0.error = Some(value.to_string()),
			_ => {}
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		match field.name() {
			"message" => self.0.message = format!("{value:?}"),
			"actor" => self.0.actor = Some(format!("{value:?}")),
			"error" => self.0.error = Some(format!("{value:?}")),
			_ => {}
		}
	}
}

struct CaptureLayer {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = EventVisitor::default();
		event.record(&mut visitor);
		visitor.0.level = Some(*event.metadata().level());
		self.events.lock().unwrap().push(visitor.0);
	}
}

/// Runs `f` on this thread with a capturing subscriber installed.
pub(crate) fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
	let events = Arc::new(Mutex::new(Vec::new()));
	let subscriber = tracing_subscriber::registry().with(CaptureLayer { events: Arc::clone(&events) });
	let result = tracing::subscriber::with_default(subscriber, f);
	let captured = events.lock().unwrap().clone();
	(result, captured)
}

/// Captured events at error level.
pub(crate) fn errors(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
	events.iter().filter(|e| e.level == Some(Level::ERROR)).collect()
}
