use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ocsf_proto_mapper::{MapperOptions, Preprocessor};

/// Map the OCSF event schema onto proto3 packages.
///
/// Downloads the OCSF schema export from schema.ocsf.io and generates
/// deterministic .proto files for selected event classes, the objects they
/// reference, and their enums.
#[derive(Parser)]
#[command(name = "ocsf-proto-mapper", version, about)]
struct Cli {
    /// Only log warnings and errors (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the OCSF schema export and cache locally.
    #[cfg(feature = "download")]
    DownloadSchema {
        /// OCSF version to download (e.g., "1.7.0").
        #[arg(long, default_value = "1.7.0")]
        ocsf_version: String,

        /// Output directory for cached schema.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Base URL for the OCSF schema export API.
        #[arg(
            long,
            default_value = "https://schema.ocsf.io/export/schema",
            env = "OCSF_SCHEMA_URL"
        )]
        schema_url: String,
    },

    /// Generate .proto files from a cached OCSF schema.
    Generate {
        /// OCSF version to generate for.
        #[arg(long, default_value = "1.7.0")]
        ocsf_version: String,

        /// Comma-separated event class names, or "all" for every class.
        ///
        /// Example: --classes authentication,security_finding,network_activity
        #[arg(long)]
        classes: String,

        /// Output directory for generated files.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Directory containing cached schema files.
        /// Schema is expected at <schema-dir>/<version>/schema.json.
        #[arg(long, default_value = ".")]
        schema_dir: PathBuf,

        /// Name of the root proto package.
        #[arg(long, default_value = "ocsf", env = "OCSF_ROOT_PACKAGE")]
        root_package: String,

        /// Do not insert a version package (e.g. `v1_7_0`) under the root.
        #[arg(long)]
        no_version_package: bool,

        /// Emit json_t and generic object fields as string instead of
        /// google.protobuf.Struct.
        #[arg(long)]
        json_as_string: bool,

        /// Leave deprecated attributes out of the generated messages.
        #[arg(long)]
        skip_deprecated: bool,

        /// Prefix for the go_package option (e.g. github.com/acme/proto).
        #[arg(long, env = "OCSF_GO_PACKAGE_PREFIX")]
        go_package_prefix: Option<String>,

        /// Prefix for the java_package option (e.g. com.acme).
        #[arg(long, env = "OCSF_JAVA_PACKAGE_PREFIX")]
        java_package_prefix: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> ocsf_proto_mapper::error::Result<()> {
    match cli.command {
        #[cfg(feature = "download")]
        Commands::DownloadSchema {
            ocsf_version,
            output_dir,
            schema_url,
        } => {
            let path = output_dir.join(&ocsf_version).join("schema.json");
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| ocsf_proto_mapper::error::Error::Schema(e.to_string()))?;
            rt.block_on(ocsf_proto_mapper::schema::download_schema(
                &ocsf_version,
                &path,
                &schema_url,
            ))?;
        }

        Commands::Generate {
            ocsf_version,
            classes,
            output_dir,
            schema_dir,
            root_package,
            no_version_package,
            json_as_string,
            skip_deprecated,
            go_package_prefix,
            java_package_prefix,
        } => {
            let schema_path = schema_dir.join(&ocsf_version).join("schema.json");
            tracing::info!("Loading schema from {}", schema_path.display());
            let schema = ocsf_proto_mapper::schema::load_schema(&schema_path)?;
            tracing::info!(
                "Loaded OCSF v{}: {} classes, {} objects",
                schema.version,
                schema.classes.len(),
                schema.objects.len()
            );

            let class_names: Vec<String> = if classes == "all" {
                schema.classes.keys().cloned().collect()
            } else {
                classes.split(',').map(|s| s.trim().to_string()).collect()
            };

            let options = MapperOptions {
                root_package,
                versioned: !no_version_package,
                json_as_string,
                skip_deprecated,
            };
            let mut preprocessor = Preprocessor::default();
            if let Some(prefix) = go_package_prefix {
                preprocessor.go_package =
                    Some(Box::new(move |path: &str| format!("{prefix}/{path}")));
            }
            if let Some(prefix) = java_package_prefix {
                preprocessor.java_package =
                    Some(Box::new(move |name: &str| format!("{prefix}.{name}")));
            }

            tracing::info!("Generating protos for {} classes", class_names.len());
            let stats = ocsf_proto_mapper::codegen::generate(
                &schema,
                &class_names,
                &output_dir,
                options,
                preprocessor,
            )?;

            tracing::info!(
                "Generated {} classes, {} objects, {} enums in {} files",
                stats.classes_generated,
                stats.objects_generated,
                stats.enums_generated,
                stats.files_written
            );
            if stats.deprecated_fields_skipped > 0 {
                tracing::info!("Skipped {} deprecated fields", stats.deprecated_fields_skipped);
            }
            if stats.string_enum_fields > 0 {
                tracing::info!(
                    "Documented {} string-keyed enums as allowed values",
                    stats.string_enum_fields
                );
            }
            if stats.unknown_types > 0 {
                tracing::warn!("{} fields have an unknown OCSF type", stats.unknown_types);
            }
            if stats.unresolved_objects > 0 {
                tracing::warn!(
                    "{} object references could not be resolved",
                    stats.unresolved_objects
                );
            }
            if stats.duplicate_enum_labels + stats.invalid_enum_codes > 0 {
                tracing::warn!(
                    "Dropped {} duplicate enum labels and {} non-integer enum codes",
                    stats.duplicate_enum_labels,
                    stats.invalid_enum_codes
                );
            }
            tracing::info!("Done.");
        }
    }

    Ok(())
}
