//! Identifier normalization for generated proto names.
//!
//! Two rules are applied:
//! - message names: cleaned and converted to UpperCamelCase
//!   (`"network_endpoint"` → `"NetworkEndpoint"`);
//! - enum type and value identifiers: cleaned and converted to
//!   SCREAMING_SNAKE_CASE (`"Authentication activity_id Logon"` →
//!   `"AUTHENTICATION_ACTIVITY_ID_LOGON"`).
//!
//! Both are memoized per [`NameNormalizer`], so an input always maps to the
//! same output for the lifetime of one mapping run.

use std::collections::HashMap;

/// Caller-supplied rewrite applied to a raw name before cleaning.
pub type NameHook = Box<dyn Fn(&str) -> String>;

/// Memoizing name normalizer scoped to one mapping run.
#[derive(Default)]
pub struct NameNormalizer {
    hook: Option<NameHook>,
    messages: HashMap<String, String>,
    enum_values: HashMap<String, String>,
}

impl std::fmt::Debug for NameNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameNormalizer")
            .field("hook", &self.hook.is_some())
            .field("messages", &self.messages.len())
            .field("enum_values", &self.enum_values.len())
            .finish()
    }
}

impl NameNormalizer {
    pub fn new(hook: Option<NameHook>) -> Self {
        Self {
            hook,
            ..Self::default()
        }
    }

    /// Canonical message name for `raw`.
    ///
    /// Inputs that clean to nothing (empty or all symbols) yield `""`. Such
    /// names collide with each other; the collision is not reported.
    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(cached) = self.messages.get(raw) {
            return cached.clone();
        }

        let name = match &self.hook {
            Some(hook) => to_upper_camel(&clean_name(&hook(raw))),
            None => to_upper_camel(&clean_name(raw)),
        };
        self.messages.insert(raw.to_string(), name.clone());
        name
    }

    /// Enum type or value identifier for `raw`.
    ///
    /// The same rule keys the enum lookup table, so a table key always equals
    /// the emitted proto identifier.
    pub fn enum_value_name(&mut self, raw: &str) -> String {
        if let Some(cached) = self.enum_values.get(raw) {
            return cached.clone();
        }

        let name = to_screaming_snake(raw);
        self.enum_values.insert(raw.to_string(), name.clone());
        name
    }
}

/// Default message-name hook: keep only the last `/`-separated segment.
pub fn strip_path_prefix(raw: &str) -> String {
    crate::schema::strip_extension_prefix(raw).to_string()
}

/// Trim and replace every run of non-alphanumeric ASCII characters with one space.
fn clean_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_gap = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }
    out
}

/// `"network endpoint"` → `"NetworkEndpoint"`. Characters after the first of
/// each word are left as they are.
fn to_upper_camel(cleaned: &str) -> String {
    cleaned
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect()
}

/// `"WinService state_id"` → `"WIN_SERVICE_STATE_ID"`.
///
/// Word breaks fall on non-alphanumerics and on lower-to-upper transitions.
fn to_screaming_snake(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in raw.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase();
        current.push(c.to_ascii_uppercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("_")
}
