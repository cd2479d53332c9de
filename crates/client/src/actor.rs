//! Local representation of a remote actor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::description::{ActorDescription, ActorId};
use crate::episode::EpisodeProxy;
use crate::error::RpcError;
use crate::gc::{GarbageCollectionPolicy, GarbageCollector};

/// Shared handle to a remote actor. The last drop runs the actor's
/// garbage-collection policy.
pub type ActorHandle = Arc<Actor>;

/// Actor exposing a data stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
	stream_token: Vec<u8>,
}

impl Sensor {
	pub(crate) fn new(description: &ActorDescription) -> Self {
		Self {
			stream_token: description.stream_token.clone().unwrap_or_default(),
		}
	}

	/// Token identifying the sensor's data stream.
	pub fn stream_token(&self) -> &[u8] {
		&self.stream_token
	}
}

/// Actor whose type id starts with `vehicle.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle;

/// Actor whose type id starts with `traffic.traffic_light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficLight;

/// Local variant selected for an actor at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorKind {
	/// Exposes a data stream.
	Sensor(Sensor),
	/// Type id starts with `vehicle.`.
	Vehicle(Vehicle),
	/// Type id starts with `traffic.traffic_light`.
	TrafficLight(TrafficLight),
	/// Any actor not matched by a more specific variant.
	Generic,
}

/// Client-side state of one simulator-owned actor.
#[derive(Debug)]
pub struct Actor {
	description: ActorDescription,
	kind: ActorKind,
	episode: EpisodeProxy,
	alive: AtomicBool,
	gc: GarbageCollectionPolicy,
}

impl Actor {
	pub(crate) fn new(description: ActorDescription, kind: ActorKind, episode: EpisodeProxy, gc: GarbageCollectionPolicy) -> Self {
		Self {
			description,
			kind,
			episode,
			alive: AtomicBool::new(true),
			gc,
		}
	}

	/// Simulator-assigned id.
	pub fn id(&self) -> ActorId {
		self.description.id
	}

	/// Type identifier, e.g. `vehicle.audi.a2`.
	pub fn type_id(&self) -> &str {
		&self.description.type_id
	}

	/// Actor this one is attached to, if any.
	pub fn parent_id(&self) -> Option<ActorId> {
		self.description.parent_id
	}

	/// Looks up an attribute value by id.
	pub fn attribute(&self, id: &str) -> Option<&str> {
		self.description.attribute(id)
	}

	/// Description the actor was built from.
	pub fn description(&self) -> &ActorDescription {
		&self.description
	}

	/// Human readable identifier used in diagnostics.
	pub fn display_id(&self) -> String {
		format!("Actor {} ({})", self.description.id, self.description.type_id)
	}

	/// Variant selected at construction.
	pub fn kind(&self) -> &ActorKind {
		&self.kind
	}

	/// Returns the sensor variant, if this actor is one.
	pub fn as_sensor(&self) -> Option<&Sensor> {
		match &self.kind {
			ActorKind::Sensor(sensor) => Some(sensor),
			_ => None,
		}
	}

	/// Returns the vehicle variant, if this actor is one.
	pub fn as_vehicle(&self) -> Option<&Vehicle> {
		match &self.kind {
			ActorKind::Vehicle(vehicle) => Some(vehicle),
			_ => None,
		}
	}

	/// Returns the traffic light variant, if this actor is one.
	pub fn as_traffic_light(&self) -> Option<&TrafficLight> {
		match &self.kind {
			ActorKind::TrafficLight(light) => Some(light),
			_ => None,
		}
	}

	/// Episode the actor issues remote calls through.
	pub fn episode(&self) -> &EpisodeProxy {
		&self.episode
	}

	/// Policy applied when the last handle drops.
	pub fn gc_policy(&self) -> GarbageCollectionPolicy {
		self.gc
	}

	/// Returns false once the actor is known to be gone from the simulator.
	pub fn is_alive(&self) -> bool {
		self.alive.load(Ordering::Acquire)
	}

	/// Records that the actor no longer exists in the simulator. One-way.
	pub fn mark_dead(&self) {
		self.alive.store(false, Ordering::Release);
	}

	/// Asks the simulator to destroy this actor.
	///
	/// Returns `Ok(true)` once the simulator confirms; the actor is then dead
	/// and no further remote call is issued through it. A dead actor is not
	/// sent anywhere and yields `Ok(false)`.
	pub fn destroy(&self) -> Result<bool, RpcError> {
		if !self.is_alive() {
			tracing::warn!(actor = %self.display_id(), "attempting to destroy an actor that is already dead");
			return Ok(false);
		}

		let episode = self.episode.lock()?;
		let destroyed = episode.destroy_actor(self.id())?;
		if destroyed {
			self.mark_dead();
			tracing::debug!(actor = %self.display_id(), "destroyed");
		} else {
			tracing::debug!(actor = %self.display_id(), "simulator did not destroy actor");
		}
		Ok(destroyed)
	}
}

impl Drop for Actor {
	fn drop(&mut self) {
		match self.gc {
			GarbageCollectionPolicy::Enabled => GarbageCollector::collect(Some(&*self)),
			GarbageCollectionPolicy::Disabled => {}
		}
	}
}
