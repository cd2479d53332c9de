//! Remote actor descriptions as received from the simulator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulator-assigned actor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// One key/value attribute of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttribute {
	/// Attribute name.
	pub id: String,
	/// Attribute value as sent by the simulator.
	pub value: String,
}

/// Description of a remote actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDescription {
	/// Simulator-assigned id.
	pub id: ActorId,
	/// Type identifier, e.g. `vehicle.audi.a2`.
	pub type_id: String,
	/// Actor this one is attached to, if any.
	#[serde(default)]
	pub parent_id: Option<ActorId>,
	/// Key/value attributes, in simulator order.
	#[serde(default)]
	pub attributes: Vec<ActorAttribute>,
	/// Present when the actor exposes a data stream.
	#[serde(default)]
	pub stream_token: Option<Vec<u8>>,
}

impl ActorDescription {
	/// Creates a description with no parent, attributes or stream.
	pub fn new(id: ActorId, type_id: impl Into<String>) -> Self {
		Self {
			id,
			type_id: type_id.into(),
			parent_id: None,
			attributes: Vec::new(),
			stream_token: None,
		}
	}

	/// Sets the stream token.
	#[must_use]
	pub fn with_stream(mut self, token: Vec<u8>) -> Self {
		self.stream_token = Some(token);
		self
	}

	/// Appends one attribute.
	#[must_use]
	pub fn with_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push(ActorAttribute {
			id: id.into(),
			value: value.into(),
		});
		self
	}

	/// Returns true when the actor exposes a data stream.
	pub fn has_stream(&self) -> bool {
		self.stream_token.is_some()
	}

	/// Looks up an attribute value by id.
	pub fn attribute(&self, id: &str) -> Option<&str> {
		self.attributes.iter().find(|a| a.id == id).map(|a| a.value.as_str())
	}
}
