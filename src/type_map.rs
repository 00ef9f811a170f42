//! Maps OCSF attribute type tags to proto3 types.
//!
//! # Type Mapping Table
//!
//! | OCSF type | Proto type | Notes |
//! |-----------|-----------|-------|
//! | `string_t`, `hostname_t`, `ip_t`, `mac_t`, `url_t`, `uuid_t`, etc. | `string` | All string-like types |
//! | `integer_t`, `port_t` | `int32` | |
//! | `long_t`, `timestamp_t` | `int64` | |
//! | `float_t` | `double` | |
//! | `boolean_t` | `bool` | |
//! | `json_t` | `google.protobuf.Struct` | Free-form value |
//! | `object_t` | message reference | Resolved by the mapper from `object_type` |
//! | anything else | `unknown` | Sentinel, logged and counted by the mapper |

/// The OCSF tag whose enums are documented as allowed strings rather than
/// turned into proto enums.
pub const STRING_TAG: &str = "string_t";

/// Fully-qualified name of the well-known free-form value message.
pub const STRUCT_TYPE: &str = "google.protobuf.Struct";

/// Import path of the file declaring [`STRUCT_TYPE`].
pub const STRUCT_IMPORT: &str = "google/protobuf/struct.proto";

/// Emitted for OCSF tags with no known mapping.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Result of mapping one OCSF type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedType {
    /// A proto3 scalar keyword.
    Scalar(&'static str),
    /// A nested object; the concrete message comes from `object_type`.
    Object,
    /// An opaque structured value (`google.protobuf.Struct`).
    Struct,
    /// Unrecognized tag. Not fatal; the field is emitted as [`UNKNOWN_TYPE`].
    Unknown,
}

impl MappedType {
    /// The proto type keyword for this mapping, or the marker used before the
    /// mapper resolves the concrete message of an object.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Scalar(k) => k,
            Self::Object => "object",
            Self::Struct => STRUCT_TYPE,
            Self::Unknown => UNKNOWN_TYPE,
        }
    }
}

/// Map an OCSF type tag to its proto3 counterpart.
pub fn map_type(type_name: &str) -> MappedType {
    let scalar = match type_name {
        "string_t" | "bytestring_t" | "datetime_t" | "email_t" | "file_hash_t" | "file_name_t"
        | "file_path_t" | "path_t" | "hostname_t" | "ip_t" | "mac_t" | "process_name_t"
        | "resource_uid_t" | "subnet_t" | "url_t" | "username_t" | "uuid_t" => "string",

        "integer_t" | "port_t" => "int32",

        "long_t" | "timestamp_t" => "int64",

        "float_t" => "double",

        "boolean_t" => "bool",

        "json_t" => return MappedType::Struct,
        "object_t" => return MappedType::Object,
        _ => return MappedType::Unknown,
    };
    MappedType::Scalar(scalar)
}
