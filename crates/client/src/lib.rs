//! Client-side handles to remote, simulator-owned actors.
//!
//! The simulator owns every actor. The client holds [`ActorHandle`]s
//! (`Arc<Actor>`) that carry the actor's description, its local variant and an
//! alive flag. When the last handle drops, the actor's garbage-collection
//! policy decides whether the simulator is asked to destroy it:
//!
//! * [`ActorFactory`]: classifies a description into a variant and builds the handle.
//! * [`GarbageCollector`]: no-panic teardown run on last release.
//! * [`Episode`] / [`EpisodeProxy`]: session context reached through the [`Simulator`] transport.
//! * [`ClientSettings`]: transport timeout and default collection policy.

#![warn(missing_docs)]

pub mod actor;
pub mod description;
pub mod episode;
pub mod error;
pub mod factory;
pub mod gc;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use actor::{Actor, ActorHandle, ActorKind, Sensor, TrafficLight, Vehicle};
pub use description::{ActorAttribute, ActorDescription, ActorId};
pub use episode::{Episode, EpisodeProxy, EpisodeState, Simulator};
pub use error::{RpcError, SettingsError};
pub use factory::ActorFactory;
pub use gc::{GarbageCollectionPolicy, GarbageCollector};
pub use settings::ClientSettings;
