//! Canonical Twitch profile and the resolver that fetches it.
//!
//! Normalization is lenient on purpose: the upstream payload shape is not guaranteed, so
//! missing or mistyped members degrade to empty strings and lists. Only a body that is not
//! JSON at all is rejected.

pub mod resolver;

pub use resolver::*;

// self
use crate::_prelude::*;

/// Provider label stamped on every profile.
pub const PROVIDER: &str = "twitch";

/// Split personal name derived from the display name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// First space-separated word of the display name.
	pub family_name: String,
	/// Second space-separated word of the display name.
	pub given_name: String,
}
impl ProfileName {
	/// Takes the first two space-separated words of `display_name`; later words are dropped.
	pub fn from_display_name(display_name: &str) -> Self {
		let mut words = display_name.splitn(3, ' ');
		let family_name = words.next().unwrap_or_default().to_owned();
		let given_name = words.next().unwrap_or_default().to_owned();

		Self { family_name, given_name }
	}
}

/// Single `{ value }` entry used for emails and photos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValue {
	/// Entry value.
	pub value: String,
}

/// Normalized profile handed to the verification callback.
///
/// A new instance is built for every authentication; nothing is cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Always [`PROVIDER`].
	pub provider: String,
	/// Twitch user identifier, taken from `_id`.
	pub id: String,
	/// Login name.
	pub username: String,
	/// Display name.
	pub display_name: String,
	/// Name parts derived from the display name.
	pub name: ProfileName,
	/// Email addresses, in provider order.
	pub emails: Vec<ProfileValue>,
	/// Reserved; always empty.
	pub photos: Vec<ProfileValue>,
	/// Raw response body.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response body with `id` aliased to `_id`.
	#[serde(rename = "_json")]
	pub json: Value,
}
impl Profile {
	/// Parses a profile endpoint body.
	///
	/// Fails only when `body` is not valid JSON; the parser error is returned untouched.
	pub fn parse(body: impl Into<String>) -> Result<Self> {
		let raw = body.into();
		let json = serde_json::from_str::<Value>(&raw)?;

		Ok(Self::from_json(raw, json))
	}

	/// Normalizes an already parsed payload.
	pub fn from_json(raw: String, mut json: Value) -> Self {
		if let Some(members) = json.as_object_mut() {
			if let Some(internal_id) = members.get("_id").cloned() {
				members.insert("id".into(), internal_id);
			}
		}

		let id = json.get("id").map(id_text).unwrap_or_default();
		let username = text(&json, "name");
		let display_name = text(&json, "display_name");
		let name = ProfileName::from_display_name(&display_name);
		let emails = json
			.get("email")
			.and_then(Value::as_str)
			.filter(|email| !email.is_empty())
			.map(|email| vec![ProfileValue { value: email.to_owned() }])
			.unwrap_or_default();

		Self {
			provider: PROVIDER.into(),
			id,
			username,
			display_name,
			name,
			emails,
			photos: Vec::new(),
			raw,
			json,
		}
	}
}

/// Status member of a provider error payload; Twitch sends numbers, other gateways strings.
///
/// Anything else is kept as raw JSON so the payload's message is never lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderStatus {
	/// Numeric HTTP-style status.
	Code(u16),
	/// Free-form status text.
	Text(String),
	/// Any other JSON value (out-of-range numbers, booleans, objects).
	Other(Value),
}
impl Display for ProviderStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Code(code) => write!(f, "{code}"),
			Self::Text(text) => f.write_str(text),
			Self::Other(value) => write!(f, "{value}"),
		}
	}
}

/// Structured error body returned by the profile endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderErrorPayload {
	/// Human-readable message.
	pub message: String,
	/// Status member, when present.
	#[serde(default)]
	pub status: Option<ProviderStatus>,
}

fn id_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Number(number) => number.to_string(),
		_ => String::new(),
	}
}

fn text(json: &Value, key: &str) -> String {
	json.get(key).and_then(Value::as_str).unwrap_or_default().to_owned()
}
