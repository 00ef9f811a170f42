//! Protocol Buffer emission from a populated [`Mapper`].
//!
//! Every non-empty package becomes one proto3 file containing, in order:
//! - `syntax` and `package` declarations
//! - `go_package`, `java_package` and `java_multiple_files` options
//! - imports, sorted by path
//! - messages sorted by name, fields sorted by name and numbered from 1
//! - enums sorted by name, values in build order
//!
//! Alongside the proto files an `enum-value-map.json` maps each enum value
//! identifier back to its OCSF label and numeric code.
//!
//! The generated output is deterministic: identical input always produces
//! byte-identical output.
//!
//! Field numbers come from the sorted position, so adding or removing an
//! attribute renumbers the fields after it. Regenerated schemas are not wire
//! compatible with earlier ones.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::imports::compute_imports;
use crate::mapper::{GenerationStats, Mapper, MapperOptions, Preprocessor};
use crate::naming::NameNormalizer;
use crate::package::PackageId;
use crate::registry::{Documentation, Enum, EnumId, EnumValue, FieldType, MessageId};
use crate::schema::Schema;
use crate::type_map::{STRUCT_TYPE, UNKNOWN_TYPE};

/// File name of the enum lookup table, written next to the root package.
pub const ENUM_VALUE_MAP_FILE: &str = "enum-value-map.json";

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: String,
    pub contents: String,
}

/// Map the requested classes and write the proto files and enum lookup
/// table under `output_dir`.
pub fn generate(
    schema: &Schema,
    class_names: &[String],
    output_dir: &Path,
    options: MapperOptions,
    preprocessor: Preprocessor,
) -> Result<GenerationStats> {
    let mut mapper = Mapper::new(schema, options, preprocessor);
    mapper.map_classes(class_names)?;

    for file in render_packages(&mut mapper) {
        write_file(&output_dir.join(&file.path), &file.contents)?;
        mapper.record_file_written();
    }

    let map_path = output_dir
        .join(mapper.packages().dir_path(mapper.base_package()))
        .join(ENUM_VALUE_MAP_FILE);
    match enum_value_map(&mut mapper) {
        Ok(json) => {
            write_file(&map_path, &json)?;
            mapper.record_file_written();
        }
        Err(e) => tracing::error!(error = %e, "skipping enum value map"),
    }

    Ok(mapper.stats())
}

/// Render every package that holds at least one message or enum, sorted by
/// path.
///
/// A package that fails to render is logged and left out.
pub fn render_packages(mapper: &mut Mapper<'_>) -> Vec<GeneratedFile> {
    let mut contents: BTreeMap<PackageId, (Vec<MessageId>, Vec<EnumId>)> = BTreeMap::new();
    for (id, message) in mapper.registry.messages() {
        contents.entry(message.package).or_default().0.push(id);
    }
    for (id, enumeration) in mapper.registry.enums() {
        contents.entry(enumeration.package).or_default().1.push(id);
    }

    let mut files = Vec::with_capacity(contents.len());
    for (package, (messages, enums)) in contents {
        let path = mapper.packages.file_path(package);
        match render_package(mapper, package, messages, enums) {
            Ok(text) => files.push(GeneratedFile {
                path,
                contents: text,
            }),
            Err(e) => tracing::error!(%path, error = %e, "failed to render package"),
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn render_package(
    mapper: &mut Mapper<'_>,
    package: PackageId,
    mut messages: Vec<MessageId>,
    mut enums: Vec<EnumId>,
) -> std::result::Result<String, fmt::Error> {
    let registry = &mapper.registry;
    let packages = &mapper.packages;
    messages.sort_by(|a, b| registry.message(*a).name.cmp(&registry.message(*b).name));
    enums.sort_by(|a, b| {
        registry
            .enumeration(*a)
            .name
            .cmp(&registry.enumeration(*b).name)
    });

    let imports: BTreeSet<String> = messages
        .iter()
        .flat_map(|id| compute_imports(registry.message(*id), registry, packages))
        .collect();

    let mut out = String::new();
    writeln!(out, "syntax = \"proto3\";")?;
    writeln!(out)?;
    writeln!(out, "package {};", packages.full_name(package))?;
    writeln!(out)?;
    writeln!(out, "option go_package = \"{}\";", mapper.go_package(package))?;
    writeln!(out, "option java_package = \"{}\";", mapper.java_package(package))?;
    writeln!(out, "option java_multiple_files = true;")?;

    if !imports.is_empty() {
        writeln!(out)?;
        for import in &imports {
            writeln!(out, "import \"{import}\";")?;
        }
    }

    for id in messages {
        writeln!(out)?;
        render_message(&mut out, mapper, id)?;
    }
    for id in enums {
        writeln!(out)?;
        render_enum(&mut out, mapper, id)?;
    }

    Ok(out)
}

fn render_message(out: &mut String, mapper: &mut Mapper<'_>, id: MessageId) -> fmt::Result {
    let message = mapper.registry.message(id);
    writeln!(out, "// {}", message.group)?;
    write_documentation(out, "", &message.documentation)?;
    writeln!(out, "message {} {{", message.name)?;

    let mut fields: Vec<_> = message.fields.iter().collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_documentation(out, "\t", &field.documentation)?;
        if field.required {
            writeln!(out, "\t// Required")?;
        }

        let proto_type = match &field.field_type {
            FieldType::Primitive(keyword) => keyword.clone(),
            FieldType::Struct => STRUCT_TYPE.to_string(),
            FieldType::Object { canonical, .. } => {
                match mapper.registry.lookup_message(canonical) {
                    Some(target) => format!(
                        "{}.{canonical}",
                        mapper
                            .packages
                            .full_name(mapper.registry.message(target).package)
                    ),
                    None if canonical.is_empty() => UNKNOWN_TYPE.to_string(),
                    None => canonical.clone(),
                }
            }
            FieldType::Enum(name) => {
                let package = mapper
                    .registry
                    .lookup_enum(name)
                    .map(|e| mapper.registry.enumeration(e).package);
                let ident = mapper.names.enum_value_name(name);
                match package {
                    Some(package) => format!("{}.{ident}", mapper.packages.full_name(package)),
                    None => ident,
                }
            }
        };
        let proto_type = if field.map {
            format!("map<string, {proto_type}>")
        } else if field.repeated {
            format!("repeated {proto_type}")
        } else {
            proto_type
        };

        writeln!(out, "\t{proto_type} {} = {};", field.name, index + 1)?;
    }

    writeln!(out, "}}")
}

fn render_enum(out: &mut String, mapper: &mut Mapper<'_>, id: EnumId) -> fmt::Result {
    let enumeration = mapper.registry.enumeration(id);
    let emitted = emitted_values(&mut mapper.names, enumeration);

    for (ident, value) in &emitted.skipped {
        tracing::warn!(
            name = %enumeration.name,
            label = %value.label,
            %ident,
            "enum value identifier already used, skipping"
        );
    }

    writeln!(out, "enum {} {{", emitted.ident)?;
    if emitted.aliased() {
        writeln!(out, "\toption allow_alias = true;")?;
    }
    if let Some(ident) = &emitted.unspecified {
        writeln!(out, "\t{ident} = 0;")?;
    }
    for (ident, value) in &emitted.values {
        write_documentation(out, "\t", &value.documentation)?;
        writeln!(out, "\t{ident} = {};", value.code)?;
    }

    writeln!(out, "}}")
}

/// The values of one enum as they appear in the proto file.
struct EmittedEnum<'a> {
    ident: String,
    /// Synthetic zero value, present when no OCSF value has code 0.
    unspecified: Option<String>,
    values: Vec<(String, &'a EnumValue)>,
    /// Values whose identifier was already taken.
    skipped: Vec<(String, &'a EnumValue)>,
}

impl EmittedEnum<'_> {
    fn aliased(&self) -> bool {
        let mut codes = BTreeSet::new();
        !self.values.iter().all(|(_, v)| codes.insert(v.code))
    }
}

/// Decide which values of `enumeration` are emitted and under which
/// identifier. Both the proto file and the lookup table go through here.
fn emitted_values<'a>(names: &mut NameNormalizer, enumeration: &'a Enum) -> EmittedEnum<'a> {
    let ident = names.enum_value_name(&enumeration.name);

    // proto3 requires the first value to be zero.
    let ordered = zero_first(enumeration);
    let mut seen = BTreeSet::new();
    let unspecified = if ordered.first().is_none_or(|v| v.code != 0) {
        let zero = format!("{ident}_UNSPECIFIED");
        seen.insert(zero.clone());
        Some(zero)
    } else {
        None
    };

    let mut values = Vec::with_capacity(ordered.len());
    let mut skipped = Vec::new();
    for value in ordered {
        let value_ident = names.enum_value_name(&format!("{} {}", enumeration.name, value.label));
        if seen.insert(value_ident.clone()) {
            values.push((value_ident, value));
        } else {
            skipped.push((value_ident, value));
        }
    }

    EmittedEnum {
        ident,
        unspecified,
        values,
        skipped,
    }
}

/// Values in build order with the first zero-coded value moved to the front.
fn zero_first(enumeration: &Enum) -> Vec<&EnumValue> {
    let mut values: Vec<_> = enumeration.values.iter().collect();
    if let Some(pos) = values.iter().position(|v| v.code == 0) {
        let zero = values.remove(pos);
        values.insert(0, zero);
    }
    values
}

fn write_documentation(out: &mut String, indent: &str, documentation: &Documentation) -> fmt::Result {
    for (key, value) in documentation {
        writeln!(out, "{indent}// {key}: {value}")?;
    }
    Ok(())
}

/// One entry of the enum lookup table.
#[derive(Debug, Serialize)]
struct EnumValueEntry<'a> {
    name: &'a str,
    value: i64,
}

/// Serialize the enum lookup table: enum value identifier → OCSF label and code.
pub fn enum_value_map(mapper: &mut Mapper<'_>) -> Result<String> {
    let mut map: BTreeMap<String, EnumValueEntry<'_>> = BTreeMap::new();
    for (_, enumeration) in mapper.registry.enums() {
        let emitted = emitted_values(&mut mapper.names, enumeration);
        for (ident, value) in emitted.values {
            map.entry(ident).or_insert(EnumValueEntry {
                name: &value.label,
                value: value.code,
            });
        }
    }

    serde_json::to_string_pretty(&map).map_err(|e| Error::Encode {
        artifact: ENUM_VALUE_MAP_FILE.to_string(),
        reason: e.to_string(),
    })
}

/// Write content to a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}
