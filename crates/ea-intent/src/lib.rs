//! Intent resolution for natural-language energy queries.
//!
//! Turns free-form text ("peak demand in North last week") into an
//! [`Intent`]: an action from a closed set plus optional region, year and
//! date-window filters.
//!
//! - [`temporal`]: dates, ranges and relative phrases → [`TimeWindow`].
//! - [`region`]: word-boundary alias table → canonical region.
//! - [`rules`]: ordered keyword table → [`ActionKind`].
//! - [`classifier`]: combines the above, with an optional language-model
//!   fallback for queries the rule table leaves unmatched.
//! - [`router`]: maps an intent to the downstream [`QueryPlan`].

pub mod classifier;
pub mod dates;
pub mod error;
pub mod fallback;
pub mod region;
pub mod router;
pub mod rules;
pub mod temporal;

pub use classifier::{IntentClassifier, Resolution};
pub use error::{IntentError, IntentResult};
pub use fallback::LanguageModel;
pub use fallback::ollama::{OllamaConfig, OllamaModel};
pub use region::RegionAliases;
pub use rules::{Rule, RuleTable};

pub use ea_protocol::{ActionKind, Intent, IntentSource, QueryPlan, TimeWindow};
