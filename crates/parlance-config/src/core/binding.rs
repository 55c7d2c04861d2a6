//! Capability bindings and the provider registry
//!
//! A section mapping selects its concrete implementation through the reserved
//! `type` key: the key's string value names a provider, and a sibling key
//! named after that provider may hold the provider's parameter sub-mapping.
//! The loader upgrades such selections to [`Binding`] values when the named
//! provider is present in the [`ProviderRegistry`]; nothing here instantiates
//! a provider — that stays with the component owning the capability.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::value::{Map, Value};

/// Reserved key that selects a provider inside a section mapping.
pub const TYPE_KEY: &str = "type";

/// Abstract responsibility fulfillable by interchangeable providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Turns audio into recognition hypotheses (the `ASR` section).
    SpeechRecognizer,
    /// Drives the dialogue (the `DM` section).
    DialogueManager,
    /// Turns text into audio (the `TTS` section).
    SpeechSynthesizer,
    /// Looks up directions between places.
    DirectionsFinder,
    /// Installs a process-wide exception hook.
    ExceptionHook,
    /// Any capability the core does not know by name; the set is open.
    Custom(String),
}

impl Capability {
    /// Stable name of this capability.
    pub fn as_str(&self) -> &str {
        match self {
            Capability::SpeechRecognizer => "speech_recognizer",
            Capability::DialogueManager => "dialogue_manager",
            Capability::SpeechSynthesizer => "speech_synthesizer",
            Capability::DirectionsFinder => "directions_finder",
            Capability::ExceptionHook => "exception_hook",
            Capability::Custom(name) => name,
        }
    }

    /// Look a capability up by its stable name, falling back to [`Capability::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "speech_recognizer" => Capability::SpeechRecognizer,
            "dialogue_manager" => Capability::DialogueManager,
            "speech_synthesizer" => Capability::SpeechSynthesizer,
            "directions_finder" => Capability::DirectionsFinder,
            "exception_hook" => Capability::ExceptionHook,
            other => Capability::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a concrete provider implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a provider identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Registry entry: a provider identity and the capability it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    id: ProviderId,
    capability: Capability,
}

impl ProviderSpec {
    /// Declare a provider for a capability.
    pub fn new(id: impl Into<ProviderId>, capability: Capability) -> Self {
        Self {
            id: id.into(),
            capability,
        }
    }

    /// The provider's identity.
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// The capability this provider serves.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }
}

/// Explicit mapping from provider identifier to its registered spec.
///
/// Passed into the loader; selections whose provider is absent here stay
/// plain strings, so an unknown provider never fails a load.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: IndexMap<String, ProviderSpec>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, returning the spec it replaced, if any.
    pub fn register(&mut self, spec: ProviderSpec) -> Option<ProviderSpec> {
        self.providers.insert(spec.id().as_str().to_string(), spec)
    }

    /// Register a provider in builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, spec: ProviderSpec) -> Self {
        self.register(spec);
        self
    }

    /// Look up a provider by identifier.
    pub fn get(&self, id: &str) -> Option<&ProviderSpec> {
        self.providers.get(id)
    }

    /// Check whether a provider is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Iterate over registered providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderSpec> {
        self.providers.values()
    }
}

/// A configuration leaf selecting a concrete provider for a capability.
///
/// Identity is the chosen provider: two bindings compare equal exactly when
/// their provider identifiers match, regardless of parameters.
#[derive(Debug, Clone)]
pub struct Binding {
    capability: Capability,
    provider: ProviderId,
    params: Map,
}

impl Binding {
    /// Create a binding of a capability to a provider with its parameters.
    pub fn new(capability: Capability, provider: ProviderId, params: Map) -> Self {
        Self {
            capability,
            provider,
            params,
        }
    }

    /// The capability this binding fills.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// The provider chosen for the capability.
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Provider-specific parameter mapping (empty when none were given).
    pub fn params(&self) -> &Map {
        &self.params
    }

    /// Look up a single provider parameter.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub(crate) fn into_parts(self) -> (Capability, ProviderId, Map) {
        (self.capability, self.provider, self.params)
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider
    }
}

impl Eq for Binding {}

impl Hash for Binding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} -> {}>", self.capability, self.provider)
    }
}
