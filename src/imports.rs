//! Import computation for generated proto files.

use std::collections::BTreeSet;

use crate::package::PackageTree;
use crate::registry::{FieldType, Message, Registry};
use crate::type_map::STRUCT_IMPORT;

/// Files `message` must import, excluding the file it lives in.
///
/// Object fields import the referenced message's file, struct fields the
/// well-known struct file, enum fields their enum's file. Object fields
/// pointing at a type that was never resolved contribute nothing.
pub fn compute_imports(
    message: &Message,
    registry: &Registry,
    packages: &PackageTree,
) -> BTreeSet<String> {
    let own = packages.file_path(message.package);
    let mut imports = BTreeSet::new();

    for field in &message.fields {
        let path = match &field.field_type {
            FieldType::Primitive(_) => continue,
            FieldType::Struct => STRUCT_IMPORT.to_string(),
            FieldType::Object { canonical, .. } => {
                let Some(target) = registry.lookup_message(canonical) else {
                    tracing::debug!(
                        proto_message = %message.name,
                        field = %field.name,
                        target = %canonical,
                        "no import for unresolved object"
                    );
                    continue;
                };
                packages.file_path(registry.message(target).package)
            }
            FieldType::Enum(name) => {
                let Some(id) = registry.lookup_enum(name) else {
                    if cfg!(debug_assertions) {
                        panic!("field {}.{} refers to unregistered enum {name}", message.name, field.name);
                    }
                    continue;
                };
                packages.file_path(registry.enumeration(id).package)
            }
        };

        if path != own {
            imports.insert(path);
        }
    }

    imports
}
