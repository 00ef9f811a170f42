//! Resolution of OCSF event classes into proto messages and enums.
//!
//! A [`Mapper`] is the state of one run: the name memo, the package tree and
//! the [`Registry`]. It walks each requested class's attributes, turns each
//! attribute into a [`Field`], and depth-first resolves every object the
//! attributes reference. Each object becomes exactly one message under the
//! shared `objects` package no matter how many attributes point at it.
//!
//! Nothing in here fails on bad schema data. Unknown type tags, dangling
//! object references and conflicting enum labels fall back to a documented
//! default, get logged at `warn`, and are counted in [`GenerationStats`].

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::naming::{NameHook, NameNormalizer, strip_path_prefix};
use crate::package::{PackageId, PackageTree};
use crate::registry::{
    Documentation, EnumValue, Field, FieldKind, FieldType, MessageId, Registry,
};
use crate::schema::{Attribute, EventClass, Schema};
use crate::type_map::{MappedType, STRING_TAG, map_type};

/// Statistics collected during a run for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub classes_generated: usize,
    pub objects_generated: usize,
    pub enums_generated: usize,
    pub files_written: usize,
    pub deprecated_fields_skipped: usize,
    /// `string_t` attributes whose enum became an `AllowedValues` note.
    pub string_enum_fields: usize,
    pub unknown_types: usize,
    pub unresolved_objects: usize,
    pub duplicate_enum_labels: usize,
    pub invalid_enum_codes: usize,
}

/// Layout and mapping switches for a run.
#[derive(Debug, Clone)]
pub struct MapperOptions {
    /// Name of the root package (and top-level output directory).
    pub root_package: String,
    /// Insert a version package (`"1.7.0"` → `v1_7_0`) under the root.
    pub versioned: bool,
    /// Emit free-form values as `string` instead of `google.protobuf.Struct`.
    pub json_as_string: bool,
    /// Leave attributes marked `@deprecated` out of the generated messages.
    pub skip_deprecated: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            root_package: "ocsf".to_string(),
            versioned: false,
            json_as_string: false,
            skip_deprecated: false,
        }
    }
}

/// Caller-supplied name rewrites.
pub struct Preprocessor {
    /// Applied to raw class and object names before normalization.
    pub message_name: Option<NameHook>,
    /// Applied to the slash-separated package path to form `go_package`.
    pub go_package: Option<NameHook>,
    /// Applied to the dotted package name to form `java_package`.
    pub java_package: Option<NameHook>,
}

impl Default for Preprocessor {
    /// Strips extension prefixes from message names; package options are
    /// left as derived.
    fn default() -> Self {
        Self {
            message_name: Some(Box::new(strip_path_prefix)),
            go_package: None,
            java_package: None,
        }
    }
}

/// State of one schema-to-proto mapping run.
pub struct Mapper<'s> {
    schema: &'s Schema,
    options: MapperOptions,
    pub(crate) names: NameNormalizer,
    pub(crate) registry: Registry,
    pub(crate) packages: PackageTree,
    /// Node below which `events` and `objects` live.
    base: PackageId,
    go_package: Option<NameHook>,
    java_package: Option<NameHook>,
    stats: GenerationStats,
}

impl<'s> Mapper<'s> {
    pub fn new(schema: &'s Schema, options: MapperOptions, preprocessor: Preprocessor) -> Self {
        let mut packages = PackageTree::new(&options.root_package);
        let mut base = packages.root();
        if options.versioned && !schema.version.is_empty() {
            base = packages.child(base, &version_to_slug(&schema.version));
        }

        Self {
            schema,
            options,
            names: NameNormalizer::new(preprocessor.message_name),
            registry: Registry::new(),
            packages,
            base,
            go_package: preprocessor.go_package,
            java_package: preprocessor.java_package,
            stats: GenerationStats::default(),
        }
    }

    /// Map the named event classes, in the given order. Repeated names are
    /// mapped once.
    ///
    /// Fails before mapping anything if a name is not in the schema.
    pub fn map_classes(&mut self, class_names: &[String]) -> Result<()> {
        let schema = self.schema;
        for name in class_names {
            if !schema.classes.contains_key(name.as_str()) {
                return Err(class_not_found(schema, name));
            }
        }

        let mut requested = BTreeSet::new();
        for name in class_names {
            if !requested.insert(name.as_str()) {
                tracing::debug!(class = %name, "class requested more than once");
                continue;
            }
            self.map_event(&schema.classes[name.as_str()]);
        }
        Ok(())
    }

    /// Build the message for one event class and everything it references.
    pub fn map_event(&mut self, class: &'s EventClass) -> MessageId {
        let name = self.names.normalize(&class.name);
        let category = if class.category.is_empty() {
            "uncategorized"
        } else {
            class.category.as_str()
        };
        let package = self.packages.path(self.base, ["events", category]);

        let (id, existed) =
            self.registry
                .get_or_create_message(&name, package, &format!("Event: {category}"));
        if existed {
            tracing::warn!(
                class = %class.name,
                proto_message = %name,
                "class name collides with an already mapped message, skipping"
            );
            return id;
        }

        let message = self.registry.message_mut(id);
        message
            .documentation
            .insert("Event UID".to_string(), class.uid.to_string());
        if !self.schema.version.is_empty() {
            message.documentation.insert(
                "URL".to_string(),
                format!(
                    "https://schema.ocsf.io/{}/classes/{}",
                    self.schema.version, class.name
                ),
            );
        }

        tracing::debug!(class = %class.name, proto_message = %name, "mapping event class");
        self.populate(id, &class.attributes);
        self.registry.complete(id);
        self.stats.classes_generated += 1;
        id
    }

    /// Append one field per attribute to a reserved message.
    fn populate(&mut self, id: MessageId, attributes: &'s BTreeMap<String, Attribute>) {
        let message_name = self.registry.message(id).name.clone();
        let package = self.registry.message(id).package;

        for (attr_name, attr) in attributes {
            if self.options.skip_deprecated && attr.deprecated.is_some() {
                self.stats.deprecated_fields_skipped += 1;
                continue;
            }

            let field = self.build_field(&message_name, package, attr_name, attr);
            self.registry.message_mut(id).fields.push(field);
        }
    }

    fn build_field(
        &mut self,
        message_name: &str,
        package: PackageId,
        attr_name: &str,
        attr: &'s Attribute,
    ) -> Field {
        let mapped = map_type(&attr.type_name);

        let mut documentation = Documentation::new();
        documentation.insert("Caption".to_string(), attr.caption.clone());
        if let Some(profile) = attr.profile.as_deref().filter(|p| !p.is_empty()) {
            documentation.insert("Profile".to_string(), profile.to_string());
        }

        let mut kind = match mapped {
            MappedType::Object => FieldKind::Object,
            MappedType::Struct => FieldKind::Struct,
            MappedType::Scalar(_) | MappedType::Unknown => FieldKind::Primitive,
        };
        // The generic `object` type carries arbitrary data, not a concrete message.
        if kind == FieldKind::Object && attr.object_type.as_deref() == Some("object") {
            kind = FieldKind::Struct;
        }

        if !attr.enum_values.is_empty() && attr.type_name == STRING_TAG {
            kind = FieldKind::Primitive;
            let allowed: Vec<&str> = attr.enum_values.keys().map(String::as_str).collect();
            documentation.insert("AllowedValues".to_string(), allowed.join(", "));
            self.stats.string_enum_fields += 1;
        } else if !attr.enum_values.is_empty() {
            kind = FieldKind::Enum;
        }

        let field_type = match kind {
            FieldKind::Primitive => {
                if mapped == MappedType::Unknown {
                    tracing::warn!(
                        proto_message = %message_name,
                        field = %attr_name,
                        type_name = %attr.type_name,
                        "unknown OCSF type"
                    );
                    self.stats.unknown_types += 1;
                }
                FieldType::Primitive(mapped.keyword().to_string())
            }
            FieldKind::Struct if self.options.json_as_string => {
                FieldType::Primitive("string".to_string())
            }
            FieldKind::Struct => FieldType::Struct,
            FieldKind::Object => {
                let declared = attr.object_type.clone().unwrap_or_default();
                let canonical = self.resolve_object(message_name, attr_name, &declared);
                FieldType::Object {
                    declared,
                    canonical,
                }
            }
            FieldKind::Enum => {
                FieldType::Enum(self.resolve_enum(message_name, package, attr_name, attr))
            }
        };

        Field {
            name: attr_name.to_string(),
            field_type,
            required: attr.is_required(),
            repeated: attr.is_array,
            map: attr.is_map,
            documentation,
        }
    }

    /// Make sure the object named `declared` has a message, building it on
    /// first sight. Returns the canonical message name.
    fn resolve_object(&mut self, message_name: &str, attr_name: &str, declared: &str) -> String {
        let canonical = self.names.normalize(declared);
        if canonical == message_name || self.registry.lookup_message(&canonical).is_some() {
            return canonical;
        }

        let schema = self.schema;
        let Some(object) = schema.object(declared) else {
            tracing::warn!(
                proto_message = %message_name,
                field = %attr_name,
                object_type = %declared,
                "object type not found in schema"
            );
            self.stats.unresolved_objects += 1;
            return canonical;
        };

        let package = self.packages.child(self.base, "objects");
        let (id, _) = self.registry.get_or_create_message(&canonical, package, "Object");
        tracing::debug!(object = %object.name, proto_message = %canonical, "mapping object");

        self.populate(id, &object.attributes);
        self.registry.complete(id);
        self.stats.objects_generated += 1;
        canonical
    }

    /// Build or extend the enum for `attr` on `message_name`. Returns the
    /// enum's canonical name.
    fn resolve_enum(
        &mut self,
        message_name: &str,
        message_package: PackageId,
        attr_name: &str,
        attr: &Attribute,
    ) -> String {
        let name = format!("{message_name} {attr_name}");
        let package = self.packages.child(message_package, "enums");
        let (id, existed) = self.registry.get_or_create_enum(&name, package);
        if !existed {
            tracing::debug!(%name, "creating enum");
        }

        for (code_key, entry) in &attr.enum_values {
            let Ok(code) = code_key.trim().parse::<i64>() else {
                tracing::warn!(
                    %name,
                    code = %code_key,
                    label = %entry.caption,
                    "enum code is not an integer, skipping value"
                );
                self.stats.invalid_enum_codes += 1;
                continue;
            };

            let enumeration = self.registry.enumeration_mut(id);
            if let Some(existing) = enumeration.value(&entry.caption) {
                if existing.code != code {
                    tracing::warn!(
                        %name,
                        label = %entry.caption,
                        kept = existing.code,
                        dropped = code,
                        "duplicate enum label, keeping first"
                    );
                    self.stats.duplicate_enum_labels += 1;
                }
                continue;
            }

            let mut documentation = Documentation::new();
            documentation.insert("Caption".to_string(), entry.caption.clone());
            documentation.insert("EnumValue".to_string(), code.to_string());
            enumeration.insert_value(EnumValue {
                label: entry.caption.clone(),
                code,
                documentation,
            });
        }

        name
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub const fn packages(&self) -> &PackageTree {
        &self.packages
    }

    /// Node holding the `events` and `objects` packages.
    pub const fn base_package(&self) -> PackageId {
        self.base
    }

    /// Canonical message name for `raw`, through this run's memo.
    pub fn normalize(&mut self, raw: &str) -> String {
        self.names.normalize(raw)
    }

    /// `go_package` option value for a package.
    pub fn go_package(&self, package: PackageId) -> String {
        let path = self.packages.dir_path(package);
        match &self.go_package {
            Some(hook) => hook(&path),
            None => path,
        }
    }

    /// `java_package` option value for a package.
    pub fn java_package(&self, package: PackageId) -> String {
        let name = self.packages.full_name(package);
        match &self.java_package {
            Some(hook) => hook(&name),
            None => name,
        }
    }

    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            enums_generated: self.registry.enum_count(),
            ..self.stats.clone()
        }
    }

    pub(crate) fn record_file_written(&mut self) {
        self.stats.files_written += 1;
    }
}

fn class_not_found(schema: &Schema, name: &str) -> Error {
    let available: Vec<&str> = schema.classes.keys().map(String::as_str).collect();
    Error::ClassNotFound {
        name: name.to_string(),
        available: if available.len() > 10 {
            format!(
                "{} ... and {} more",
                available[..10].join(", "),
                available.len() - 10
            )
        } else {
            available.join(", ")
        },
    }
}

/// `"1.7.0"` → `"v1_7_0"`, `"1.8.0-dev"` → `"v1_8_0_dev"`.
pub fn version_to_slug(version: &str) -> String {
    format!("v{}", version.replace(['.', '-'], "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EntryState;
    use crate::schema::{EnumEntry, ObjectDef};

    fn attr(type_name: &str) -> Attribute {
        Attribute {
            type_name: type_name.to_string(),
            caption: type_name.to_string(),
            ..Attribute::default()
        }
    }

    fn object_attr(object_type: &str) -> Attribute {
        Attribute {
            object_type: Some(object_type.to_string()),
            ..attr("object_t")
        }
    }

    fn enum_attr(type_name: &str, entries: &[(&str, &str)]) -> Attribute {
        Attribute {
            enum_values: entries
                .iter()
                .map(|(code, caption)| {
                    (
                        (*code).to_string(),
                        EnumEntry {
                            caption: (*caption).to_string(),
                            description: None,
                        },
                    )
                })
                .collect(),
            ..attr(type_name)
        }
    }

    fn object(name: &str, attributes: Vec<(&str, Attribute)>) -> (String, ObjectDef) {
        (
            name.to_string(),
            ObjectDef {
                name: name.to_string(),
                caption: String::new(),
                attributes: attributes
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            },
        )
    }

    fn event(name: &str, category: &str, attributes: Vec<(&str, Attribute)>) -> (String, EventClass) {
        (
            name.to_string(),
            EventClass {
                name: name.to_string(),
                uid: 1001,
                caption: String::new(),
                category: category.to_string(),
                attributes: attributes
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            },
        )
    }

    fn field<'a>(registry: &'a Registry, message: &str, field: &str) -> &'a Field {
        let id = registry.lookup_message(message).expect("message registered");
        registry
            .message(id)
            .fields
            .iter()
            .find(|f| f.name == field)
            .expect("field present")
    }

    #[test]
    fn string_enum_becomes_documented_primitive() {
        let schema = Schema {
            version: "1.7.0".to_string(),
            classes: [event(
                "e1",
                "cat",
                vec![("status", enum_attr("string_t", &[("0", "OK"), ("1", "FAIL")]))],
            )]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e1".to_string()]).unwrap();

        let status = field(mapper.registry(), "E1", "status");
        assert_eq!(status.kind(), FieldKind::Primitive);
        assert_eq!(status.field_type, FieldType::Primitive("string".to_string()));
        assert_eq!(status.documentation["AllowedValues"], "0, 1");
        assert_eq!(mapper.registry().enum_count(), 0);
        assert_eq!(mapper.stats().string_enum_fields, 1);
    }

    #[test]
    fn integer_enum_becomes_enum() {
        let schema = Schema {
            classes: [event(
                "e2",
                "cat",
                vec![("severity", enum_attr("integer_t", &[("1", "Low"), ("2", "High")]))],
            )]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e2".to_string()]).unwrap();

        let severity = field(mapper.registry(), "E2", "severity");
        assert_eq!(severity.field_type, FieldType::Enum("E2 severity".to_string()));

        let id = mapper.registry().lookup_enum("E2 severity").unwrap();
        let e = mapper.registry().enumeration(id);
        let values: Vec<(&str, i64)> = e.values.iter().map(|v| (v.label.as_str(), v.code)).collect();
        assert_eq!(values, vec![("Low", 1), ("High", 2)]);
        assert_eq!(e.values[0].documentation["EnumValue"], "1");
        assert_eq!(
            mapper.packages().full_name(e.package),
            "ocsf.events.cat.enums"
        );
    }

    #[test]
    fn duplicate_label_keeps_first_code() {
        let schema = Schema {
            classes: [event(
                "e",
                "cat",
                vec![("kind_id", enum_attr("integer_t", &[("1", "Same"), ("2", "Same"), ("x", "Bad")]))],
            )]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let id = mapper.registry().lookup_enum("E kind_id").unwrap();
        let e = mapper.registry().enumeration(id);
        assert_eq!(e.values.len(), 1);
        assert_eq!(e.values[0].code, 1);
        assert_eq!(mapper.stats().duplicate_enum_labels, 1);
        assert_eq!(mapper.stats().invalid_enum_codes, 1);
    }

    #[test]
    fn self_reference_terminates() {
        let schema = Schema {
            classes: [event("e", "cat", vec![("a", object_attr("a"))])].into(),
            objects: [object("a", vec![("child", object_attr("a"))])].into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let registry = mapper.registry();
        assert_eq!(registry.messages().filter(|(_, m)| m.name == "A").count(), 1);
        let child = field(registry, "A", "child");
        assert_eq!(child.kind(), FieldKind::Object);
        assert!(matches!(&child.field_type, FieldType::Object { canonical, .. } if canonical == "A"));
        assert_eq!(mapper.stats().objects_generated, 1);
    }

    #[test]
    fn mutual_recursion_terminates() {
        let schema = Schema {
            classes: [event("e", "cat", vec![("a", object_attr("a"))])].into(),
            objects: [
                object("a", vec![("b", object_attr("b"))]),
                object("b", vec![("a", object_attr("a"))]),
            ]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        assert_eq!(mapper.registry().message_count(), 3);
        assert!(
            mapper
                .registry()
                .messages()
                .all(|(_, m)| m.state == EntryState::Complete)
        );
    }

    #[test]
    fn shared_object_is_built_once() {
        let schema = Schema {
            classes: [event(
                "e",
                "cat",
                vec![("b", object_attr("b")), ("c", object_attr("c"))],
            )]
            .into(),
            objects: [
                object("b", vec![("d", object_attr("d"))]),
                object("c", vec![("d", object_attr("d"))]),
                object("d", vec![("x", attr("string_t"))]),
            ]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let registry = mapper.registry();
        assert_eq!(registry.messages().filter(|(_, m)| m.name == "D").count(), 1);
        for owner in ["B", "C"] {
            let d = field(registry, owner, "d");
            assert!(matches!(&d.field_type, FieldType::Object { canonical, .. } if canonical == "D"));
        }
        let d = registry.lookup_message("D").unwrap();
        assert_eq!(registry.message(d).fields.len(), 1);
        assert_eq!(registry.message(d).group, "Object");
    }

    #[test]
    fn enums_are_scoped_per_message_and_attribute() {
        let levels: &[(&str, &str)] = &[("1", "Low"), ("2", "High")];
        let schema = Schema {
            classes: [
                event("e1", "cat", vec![("level", enum_attr("integer_t", levels))]),
                event("e2", "cat", vec![("level", enum_attr("integer_t", levels))]),
            ]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper
            .map_classes(&["e1".to_string(), "e2".to_string()])
            .unwrap();

        let registry = mapper.registry();
        let a = registry.lookup_enum("E1 level").unwrap();
        let b = registry.lookup_enum("E2 level").unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.enum_count(), 2);
    }

    #[test]
    fn structural_fields() {
        let schema = Schema {
            classes: [event(
                "e",
                "cat",
                vec![
                    ("unmapped", object_attr("object")),
                    ("raw", attr("json_t")),
                    ("weird", attr("mystery_t")),
                    ("missing", object_attr("nowhere")),
                ],
            )]
            .into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let registry = mapper.registry();
        assert_eq!(field(registry, "E", "unmapped").field_type, FieldType::Struct);
        assert_eq!(field(registry, "E", "raw").field_type, FieldType::Struct);
        assert_eq!(
            field(registry, "E", "weird").field_type,
            FieldType::Primitive("unknown".to_string())
        );
        assert_eq!(field(registry, "E", "missing").kind(), FieldKind::Object);
        assert_eq!(registry.lookup_message("Nowhere"), None);

        let stats = mapper.stats();
        assert_eq!(stats.unknown_types, 1);
        assert_eq!(stats.unresolved_objects, 1);
    }

    #[test]
    fn json_as_string_and_skip_deprecated() {
        let mut old = attr("string_t");
        old.deprecated = Some(crate::schema::Deprecation::default());
        let schema = Schema {
            classes: [event("e", "cat", vec![("raw", attr("json_t")), ("old", old)])].into(),
            ..Schema::default()
        };
        let options = MapperOptions {
            json_as_string: true,
            skip_deprecated: true,
            ..MapperOptions::default()
        };
        let mut mapper = Mapper::new(&schema, options, Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let id = mapper.registry().lookup_message("E").unwrap();
        let fields = &mapper.registry().message(id).fields;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, FieldType::Primitive("string".to_string()));
        assert_eq!(mapper.stats().deprecated_fields_skipped, 1);
    }

    #[test]
    fn field_flags_and_documentation() {
        let mut a = attr("ip_t");
        a.requirement = Some("required".to_string());
        a.is_array = true;
        a.profile = Some("host".to_string());
        let mut m = attr("string_t");
        m.is_map = true;
        let schema = Schema {
            classes: [event("e", "cat", vec![("ips", a), ("labels", m)])].into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper.map_classes(&["e".to_string()]).unwrap();

        let ips = field(mapper.registry(), "E", "ips");
        assert!(ips.required && ips.repeated && !ips.map);
        assert_eq!(ips.documentation["Caption"], "ip_t");
        assert_eq!(ips.documentation["Profile"], "host");

        let labels = field(mapper.registry(), "E", "labels");
        assert!(labels.map && !labels.required);
        assert!(!labels.documentation.contains_key("Profile"));
    }

    #[test]
    fn packages_follow_layout() {
        let schema = Schema {
            version: "1.7.0".to_string(),
            classes: [event("authentication", "iam", vec![("user", object_attr("user"))])].into(),
            objects: [object("user", vec![])].into(),
        };
        let options = MapperOptions {
            versioned: true,
            ..MapperOptions::default()
        };
        let mut mapper = Mapper::new(&schema, options, Preprocessor::default());
        mapper.map_classes(&["authentication".to_string()]).unwrap();

        let registry = mapper.registry();
        let packages = mapper.packages();
        let auth = registry.message(registry.lookup_message("Authentication").unwrap());
        let user = registry.message(registry.lookup_message("User").unwrap());
        assert_eq!(packages.full_name(auth.package), "ocsf.v1_7_0.events.iam");
        assert_eq!(packages.full_name(user.package), "ocsf.v1_7_0.objects");
        assert_eq!(auth.group, "Event: iam");
        assert_eq!(auth.documentation["Event UID"], "1001");
        assert_eq!(
            auth.documentation["URL"],
            "https://schema.ocsf.io/1.7.0/classes/authentication"
        );
    }

    #[test]
    fn repeated_class_is_mapped_once() {
        let schema = Schema {
            classes: [event("e", "cat", vec![("x", attr("string_t"))])].into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        mapper
            .map_classes(&["e".to_string(), "e".to_string()])
            .unwrap();

        assert_eq!(mapper.registry().message_count(), 1);
        assert_eq!(mapper.stats().classes_generated, 1);
    }

    #[test]
    fn unknown_class_is_an_error() {
        let schema = Schema {
            classes: [event("authentication", "iam", vec![])].into(),
            ..Schema::default()
        };
        let mut mapper = Mapper::new(&schema, MapperOptions::default(), Preprocessor::default());
        let err = mapper
            .map_classes(&["nope".to_string()])
            .unwrap_err()
            .to_string();
        assert!(err.contains("nope"));
        assert!(err.contains("authentication"));
        assert_eq!(mapper.registry().message_count(), 0);
    }

    #[test]
    fn package_option_hooks() {
        let schema = Schema::default();
        let preprocessor = Preprocessor {
            go_package: Some(Box::new(|p: &str| format!("github.com/acme/proto/{p}"))),
            java_package: Some(Box::new(|p: &str| format!("com.acme.{p}"))),
            ..Preprocessor::default()
        };
        let mapper = Mapper::new(&schema, MapperOptions::default(), preprocessor);
        let root = mapper.packages().root();
        assert_eq!(mapper.go_package(root), "github.com/acme/proto/ocsf");
        assert_eq!(mapper.java_package(root), "com.acme.ocsf");
    }

    #[test]
    fn version_slug() {
        assert_eq!(version_to_slug("1.7.0"), "v1_7_0");
        assert_eq!(version_to_slug("1.8.0-dev"), "v1_8_0_dev");
    }
}
