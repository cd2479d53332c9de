//! Builds actor handles from remote descriptions.

use std::sync::Arc;

use crate::actor::{Actor, ActorHandle, ActorKind, Sensor, TrafficLight, Vehicle};
use crate::description::ActorDescription;
use crate::episode::EpisodeProxy;
use crate::gc::GarbageCollectionPolicy;

const VEHICLE_PREFIX: &str = "vehicle.";
const TRAFFIC_LIGHT_PREFIX: &str = "traffic.traffic_light";

/// Variant chosen for a description. First match wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorClass {
	Sensor,
	Vehicle,
	TrafficLight,
	Generic,
}

fn classify(description: &ActorDescription) -> ActorClass {
	if description.has_stream() {
		ActorClass::Sensor
	} else if description.type_id.starts_with(VEHICLE_PREFIX) {
		ActorClass::Vehicle
	} else if description.type_id.starts_with(TRAFFIC_LIGHT_PREFIX) {
		ActorClass::TrafficLight
	} else {
		ActorClass::Generic
	}
}

/// Constructs [`ActorHandle`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActorFactory;

impl ActorFactory {
	/// Classifies `description`, builds the matching variant and wraps it in a
	/// shared handle carrying `gc`.
	///
	/// With [`GarbageCollectionPolicy::Enabled`] the last drop destroys the
	/// remote actor; with [`GarbageCollectionPolicy::Disabled`] it only frees
	/// local memory.
	pub fn make_actor(episode: EpisodeProxy, description: ActorDescription, gc: GarbageCollectionPolicy) -> ActorHandle {
		let kind = match classify(&description) {
			ActorClass::Sensor => ActorKind::Sensor(Sensor::new(&description)),
			ActorClass::Vehicle => ActorKind::Vehicle(Vehicle),
			ActorClass::TrafficLight => ActorKind::TrafficLight(TrafficLight),
			ActorClass::Generic => ActorKind::Generic,
		};
		tracing::trace!(actor_id = %description.id, type_id = %description.type_id, ?gc, "actor_factory.make_actor");
		Arc::new(Actor::new(description, kind, episode, gc))
	}
}
