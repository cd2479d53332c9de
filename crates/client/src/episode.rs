//! Session context through which actors reach the simulator.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use stagehand_sync::AtomicCell;

use crate::actor::ActorHandle;
use crate::description::{ActorDescription, ActorId};
use crate::error::RpcError;
use crate::factory::ActorFactory;
use crate::settings::ClientSettings;

/// Remote calls the actor layer needs from the simulator connection.
///
/// Implementations block the calling thread for the round trip and report a
/// [`RpcError::Timeout`] once `timeout` elapses.
pub trait Simulator: Send + Sync {
	/// Asks the simulator to destroy one actor. `Ok(false)` means the
	/// simulator answered but did not destroy it.
	fn destroy_actor(&self, id: ActorId, timeout: Duration) -> Result<bool, RpcError>;
}

/// Snapshot of the most recent simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
	/// Episode the tick belongs to.
	pub episode_id: u64,
	/// Simulator frame number.
	pub frame: u64,
	/// Simulated seconds since the episode started.
	pub elapsed_seconds: f64,
}

impl EpisodeState {
	/// State of an episode before its first tick.
	pub fn initial(episode_id: u64) -> Self {
		Self {
			episode_id,
			frame: 0,
			elapsed_seconds: 0.0,
		}
	}
}

/// One simulation episode as seen by the client.
pub struct Episode {
	id: u64,
	simulator: Arc<dyn Simulator>,
	settings: ClientSettings,
	state: AtomicCell<EpisodeState>,
}

impl Episode {
	/// Creates an episode bound to a simulator connection.
	pub fn new(id: u64, simulator: Arc<dyn Simulator>, settings: ClientSettings) -> Arc<Self> {
		Arc::new(Self {
			id,
			simulator,
			settings,
			state: AtomicCell::with_value(EpisodeState::initial(id)),
		})
	}

	/// Simulator-assigned episode id.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Settings actors of this episode are built with.
	pub fn settings(&self) -> &ClientSettings {
		&self.settings
	}

	/// Returns a weak proxy for actors to hold.
	pub fn proxy(self: &Arc<Self>) -> EpisodeProxy {
		EpisodeProxy {
			episode_id: self.id,
			episode: Arc::downgrade(self),
		}
	}

	/// Latest published tick state.
	///
	/// Relaxed: a reader may see an older snapshot than one another thread has
	/// already published.
	pub fn state(&self) -> Option<Arc<EpisodeState>> {
		self.state.load()
	}

	/// Publishes the state of a new tick.
	pub fn publish_state(&self, state: EpisodeState) {
		self.state.store(Some(Arc::new(state)));
	}

	/// Builds a handle for `description` using the configured collection policy.
	pub fn make_actor(self: &Arc<Self>, description: ActorDescription) -> ActorHandle {
		ActorFactory::make_actor(self.proxy(), description, self.settings.garbage_collection)
	}

	/// Issues the remote destroy call for one actor, bounded by the
	/// configured transport timeout.
	pub fn destroy_actor(&self, id: ActorId) -> Result<bool, RpcError> {
		let timeout = self.settings.timeout();
		tracing::trace!(episode = self.id, actor_id = %id, timeout_ms = self.settings.timeout_ms, "episode.destroy_actor");
		self.simulator.destroy_actor(id, timeout)
	}
}

impl fmt::Debug for Episode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Episode")
			.field("id", &self.id)
			.field("settings", &self.settings)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

/// Non-owning reference to an [`Episode`].
#[derive(Debug, Clone)]
pub struct EpisodeProxy {
	episode_id: u64,
	episode: Weak<Episode>,
}

impl EpisodeProxy {
	/// Id of the episode this proxy points to, even once it is gone.
	pub fn id(&self) -> u64 {
		self.episode_id
	}

	/// Upgrades to the episode, or fails if it has been dropped.
	pub fn lock(&self) -> Result<Arc<Episode>, RpcError> {
		self.episode.upgrade().ok_or(RpcError::EpisodeLost)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{Behavior, RecordingSimulator};

	#[test]
	fn proxy_fails_once_episode_is_dropped() {
		let (episode, _simulator) = RecordingSimulator::episode(Behavior::Succeed);
		let proxy = episode.proxy();
		assert_eq!(proxy.lock().unwrap().id(), episode.id());

		drop(episode);
		assert_eq!(proxy.lock().unwrap_err(), RpcError::EpisodeLost);
		assert_eq!(proxy.id(), 1);
	}

	#[test]
	fn published_state_is_visible_across_threads() {
		let (episode, _simulator) = RecordingSimulator::episode(Behavior::Succeed);
		assert_eq!(episode.state().as_deref(), Some(&EpisodeState::initial(1)));

		std::thread::scope(|scope| {
			scope.spawn(|| {
				for frame in 1..=100 {
					episode.publish_state(EpisodeState {
						episode_id: 1,
						frame,
						elapsed_seconds: frame as f64 * 0.05,
					});
				}
			});
			scope.spawn(|| {
				for _ in 0..100 {
					let state = episode.state().expect("state is never nulled");
					assert!(state.frame <= 100);
					assert_eq!(state.episode_id, 1);
				}
			});
		});

		assert_eq!(episode.state().map(|s| s.frame), Some(100));
	}

	#[test]
	fn destroy_actor_forwards_to_simulator() {
		let (episode, simulator) = RecordingSimulator::episode(Behavior::Refuse);
		assert_eq!(episode.destroy_actor(ActorId(9)), Ok(false));
		assert_eq!(simulator.destroy_calls(), vec![ActorId(9)]);
		assert_eq!(simulator.timeouts(), vec![Duration::from_secs(5)]);
	}

	#[test]
	fn destroy_actor_hands_configured_timeout_to_simulator() {
		let settings = ClientSettings::from_toml_str("timeout_ms = 250").unwrap();
		let (episode, simulator) = RecordingSimulator::episode_with(Behavior::TimeOut, settings);
		let error = episode.destroy_actor(ActorId(3)).unwrap_err();

		assert_eq!(simulator.timeouts(), vec![Duration::from_millis(250)]);
		assert_eq!(
			error,
			RpcError::Timeout {
				call: "destroy_actor",
				timeout: Duration::from_millis(250),
			}
		);
	}
}
