//! Map the OCSF event schema onto a proto3 package hierarchy.
//!
//! `ocsf-proto-mapper` reads the [OCSF](https://schema.ocsf.io/) (Open
//! Cybersecurity Schema Framework) schema export and turns event classes,
//! the objects they reference, and their enumerations into proto3 files laid
//! out as packages:
//!
//! - `ocsf.events.<category>`: one message per event class
//! - `ocsf.objects`: one message per referenced object, shared by all events
//! - `<package>.enums`: one enum per (message, attribute) pair
//!
//! It also writes `enum-value-map.json`, mapping every enum value identifier
//! to its OCSF label and numeric code, for decoding wire values back to labels.
//!
//! # Features
//!
//! - Resolves transitive and self-referencing object graphs, building each
//!   object once
//! - Documents `string_t` enums as allowed values instead of proto enums
//! - Maps `json_t` and the generic `object` type to `google.protobuf.Struct`
//!   (or `string` with [`MapperOptions::json_as_string`])
//! - Handles extension-prefixed objects (e.g., `win/win_service`)
//! - Deterministic output: byte-identical across runs
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ocsf_proto_mapper::{MapperOptions, Preprocessor};
//!
//! let schema = ocsf_proto_mapper::schema::load_schema(Path::new("schema.json"))?;
//! let stats = ocsf_proto_mapper::codegen::generate(
//!     &schema,
//!     &["authentication".to_string(), "security_finding".to_string()],
//!     Path::new("output/"),
//!     MapperOptions::default(),
//!     Preprocessor::default(),
//! )?;
//! eprintln!("Generated {} classes, {} objects", stats.classes_generated, stats.objects_generated);
//! # Ok::<(), ocsf_proto_mapper::error::Error>(())
//! ```
//!
//! A run is single-threaded. All state lives in one [`Mapper`]; build a new
//! one for each run.

pub mod codegen;
pub mod error;
pub mod imports;
pub mod mapper;
pub mod naming;
pub mod package;
pub mod registry;
pub mod schema;
pub mod type_map;

pub use mapper::{GenerationStats, Mapper, MapperOptions, Preprocessor};
