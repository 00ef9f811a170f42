//! Run-scoped store of resolved messages and enums.
//!
//! Every message and enum is keyed by its canonical name and exists at most
//! once per run. A message is registered in the [`EntryState::Reserved`] state
//! before its fields are built, so a reference back to it from its own
//! attribute graph finds the reservation and stops instead of recursing.

use std::collections::BTreeMap;

use crate::package::PackageId;

/// Documentation attached to messages, fields and enum values, emitted as
/// `// Key: value` comment lines in key order.
pub type Documentation = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnumId(usize);

/// Build state of a registered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Name claimed, fields still being populated.
    Reserved,
    /// All fields populated.
    Complete,
}

/// A proto message built from an event class or shared object.
#[derive(Debug)]
pub struct Message {
    /// Canonical (UpperCamelCase) name; the registry key.
    pub name: String,
    /// Grouping label, e.g. `"Event: iam"` or `"Object"`.
    pub group: String,
    pub documentation: Documentation,
    pub package: PackageId,
    /// Fields in build order. Emission sorts them by name.
    pub fields: Vec<Field>,
    pub state: EntryState,
}

/// Broad classification of a field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Primitive,
    Object,
    Struct,
    Enum,
}

/// The resolved type of a field. The variant is the field's kind and decides
/// what the carried name means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Proto scalar keyword, or `unknown` for unmapped OCSF tags.
    Primitive(String),
    /// Reference to another message.
    Object {
        /// Object type name as declared by the attribute (may carry an
        /// extension prefix).
        declared: String,
        /// Canonical message name the declaration normalizes to.
        canonical: String,
    },
    /// `google.protobuf.Struct`.
    Struct,
    /// Canonical name of the field's enum.
    Enum(String),
}

impl FieldType {
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Primitive(_) => FieldKind::Primitive,
            Self::Object { .. } => FieldKind::Object,
            Self::Struct => FieldKind::Struct,
            Self::Enum(_) => FieldKind::Enum,
        }
    }
}

/// One member of a [`Message`].
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub repeated: bool,
    pub map: bool,
    pub documentation: Documentation,
}

impl Field {
    pub const fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }
}

/// A proto enum scoped to one (message, attribute) pair.
#[derive(Debug)]
pub struct Enum {
    /// `"<message name> <attribute name>"`.
    pub name: String,
    pub package: PackageId,
    /// Values in build order, unique by label.
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    /// Display label (the OCSF caption).
    pub label: String,
    pub code: i64,
    pub documentation: Documentation,
}

impl Enum {
    pub fn value(&self, label: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.label == label)
    }

    /// Add `value` unless its label is already present. Returns whether it was
    /// added; the first value seen for a label wins.
    pub fn insert_value(&mut self, value: EnumValue) -> bool {
        if self.value(&value.label).is_some() {
            return false;
        }
        self.values.push(value);
        true
    }
}

/// At-most-once store of messages and enums for one run.
#[derive(Debug, Default)]
pub struct Registry {
    messages: Vec<Message>,
    message_index: BTreeMap<String, MessageId>,
    enums: Vec<Enum>,
    enum_index: BTreeMap<String, EnumId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the message registered under `name`, or reserve a new empty one.
    ///
    /// The flag is `true` when the message already existed; callers must not
    /// populate it again in that case.
    pub fn get_or_create_message(
        &mut self,
        name: &str,
        package: PackageId,
        group: &str,
    ) -> (MessageId, bool) {
        if let Some(&id) = self.message_index.get(name) {
            return (id, true);
        }

        let id = MessageId(self.messages.len());
        self.messages.push(Message {
            name: name.to_string(),
            group: group.to_string(),
            documentation: Documentation::new(),
            package,
            fields: Vec::new(),
            state: EntryState::Reserved,
        });
        self.message_index.insert(name.to_string(), id);
        (id, false)
    }

    /// Return the enum registered under `name`, or create an empty one.
    pub fn get_or_create_enum(&mut self, name: &str, package: PackageId) -> (EnumId, bool) {
        if let Some(&id) = self.enum_index.get(name) {
            return (id, true);
        }

        let id = EnumId(self.enums.len());
        self.enums.push(Enum {
            name: name.to_string(),
            package,
            values: Vec::new(),
        });
        self.enum_index.insert(name.to_string(), id);
        (id, false)
    }

    pub fn complete(&mut self, id: MessageId) {
        let message = &mut self.messages[id.0];
        debug_assert_eq!(message.state, EntryState::Reserved, "{} completed twice", message.name);
        message.state = EntryState::Complete;
    }

    pub fn lookup_message(&self, name: &str) -> Option<MessageId> {
        self.message_index.get(name).copied()
    }

    pub fn lookup_enum(&self, name: &str) -> Option<EnumId> {
        self.enum_index.get(name).copied()
    }

    pub fn message(&self, id: MessageId) -> &Message {
        &self.messages[id.0]
    }

    pub fn message_mut(&mut self, id: MessageId) -> &mut Message {
        &mut self.messages[id.0]
    }

    pub fn enumeration(&self, id: EnumId) -> &Enum {
        &self.enums[id.0]
    }

    pub fn enumeration_mut(&mut self, id: EnumId) -> &mut Enum {
        &mut self.enums[id.0]
    }

    /// Messages in registration order.
    pub fn messages(&self) -> impl Iterator<Item = (MessageId, &Message)> {
        self.messages.iter().enumerate().map(|(i, m)| (MessageId(i), m))
    }

    /// Enums in registration order.
    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &Enum)> {
        self.enums.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}
