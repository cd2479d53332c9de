//! Remote garbage collection of actors on last release.
//!
//! # Failure classes
//!
//! [`GarbageCollector::collect`] runs inside `Drop` and never unwinds out of it:
//!
//! * Timeout: logged at error level; the local actor is still released and the
//!   remote one is left in the simulation. Not retried.
//! * Any other [`RpcError`]: logged as critical, then the process aborts.
//! * A panic raised by the remote call: logged as critical, then the process
//!   aborts.
//!
//! At most one destroy is attempted per actor. Retrying against an actor that
//! may already be gone is not safe without protocol support.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::RpcError;

/// Whether releasing the last handle also destroys the remote actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarbageCollectionPolicy {
	/// Destroy the remote actor when the last handle drops.
	#[default]
	Enabled,
	/// Only release local memory; someone else owns the remote actor.
	Disabled,
}

/// Outcome of one teardown attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Teardown {
	/// Nothing to do, or the remote call returned.
	Done,
	TimedOut(RpcError),
	Failed(RpcError),
	Panicked(String),
}

/// Teardown run when the last owner of a collected actor releases it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GarbageCollector;

impl GarbageCollector {
	/// Destroys `actor` in the simulator if it is still alive.
	///
	/// `None` is accepted and ignored. Blocks for the remote round trip.
	pub fn collect(actor: Option<&Actor>) {
		let Some(actor) = actor else {
			return;
		};

		match Self::teardown(actor) {
			Teardown::Done => {}
			Teardown::TimedOut(error) => {
				tracing::error!(
					actor = %actor.display_id(),
					%error,
					"timeout while trying to garbage collect actor, actor hasn't been removed from the simulation"
				);
			}
			Teardown::Failed(error) => terminate(&actor.display_id(), &format!("error while trying to garbage collect actor: {error}")),
			Teardown::Panicked(message) => terminate(
				&actor.display_id(),
				&format!("unknown failure while trying to garbage collect actor: {message}"),
			),
		}
	}

	/// Issues the destroy call for a live actor and classifies the result.
	pub(crate) fn teardown(actor: &Actor) -> Teardown {
		if !actor.is_alive() {
			return Teardown::Done;
		}

		match panic::catch_unwind(AssertUnwindSafe(|| actor.destroy())) {
			Ok(Ok(_)) => Teardown::Done,
			Ok(Err(error)) if error.is_timeout() => Teardown::TimedOut(error),
			Ok(Err(error)) => Teardown::Failed(error),
			Err(payload) => Teardown::Panicked(panic_message(payload.as_ref())),
		}
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"<unknown panic>".to_string()
	}
}

fn terminate(display_id: &str, message: &str) -> ! {
	tracing::error!(actor = %display_id, severity = "critical", "{message}");
	std::process::abort()
}
