// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Parcelable code generator
//!
//! '''bash
//! cargo run --bin parcelgen -- --help
//! '''

use parcel_generate::{java, CodeGeneratorConfig, FailureMode, ParcelExtension, SourceInstaller};
use parcel_reflection::{platform_registry, simple_name, Diagnostics, Registry};
use std::{io::Write, path::PathBuf};
use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Parcelable code generator",
    about = "Generate Parcelable implementations for Java value classes"
)]
struct Options {
    /// Path to the YAML-encoded type declarations.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Qualified name of the value class to implement.
    #[structopt(long)]
    value_class: String,

    /// Stop at the first unsupported property.
    #[structopt(long)]
    strict: bool,

    /// Directory where to write the generated class (otherwise print code on stdout).
    #[structopt(long)]
    target_source_dir: Option<PathBuf>,

    /// Install the `TypeAdapter` runtime in the `target_source_dir`.
    #[structopt(long)]
    with_runtime: bool,

    /// Name of the generated class (by default, `AutoValue_` followed by the simple name of
    /// the value class). The generated class extends the same name prefixed with `$`.
    #[structopt(long)]
    generated_name: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parcel_generate=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = Options::from_args();
    let content = std::fs::read_to_string(&options.input).expect("input file must be readable");
    let declarations = serde_yaml::from_str::<Registry>(content.as_str()).unwrap();
    let mut registry = platform_registry();
    registry.extend(declarations);

    let value_class = registry
        .get(&options.value_class)
        .unwrap_or_else(|| panic!("unknown value class {}", options.value_class))
        .clone();
    let generated_name = options
        .generated_name
        .clone()
        .unwrap_or_else(|| format!("AutoValue_{}", simple_name(&value_class.name)));
    let class_to_extend = format!("${}", generated_name);

    let failure_mode = if options.strict {
        FailureMode::Strict
    } else {
        FailureMode::Soft
    };
    let config = CodeGeneratorConfig::new().with_failure_mode(failure_mode);
    let extension = ParcelExtension::new(config);
    let mut diagnostics = Diagnostics::new();
    let mut context = extension.context(&value_class, &registry, &mut diagnostics);
    let result = extension.applicable(&mut context).and_then(|applicable| {
        if !applicable {
            tracing::warn!("{} does not implement Parcelable", value_class.name);
            return Ok(None);
        }
        let is_final = extension.must_be_final();
        extension.generate(&mut context, &generated_name, &class_to_extend, is_final)
    });

    for diagnostic in diagnostics.iter() {
        eprintln!(
            "{:?}: {}: {}",
            diagnostic.kind, diagnostic.element, diagnostic.message
        );
    }
    let source = match result {
        Ok(Some(source)) => source,
        Ok(None) => std::process::exit(1),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    match options.target_source_dir {
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(source.as_bytes()).unwrap();
        }
        Some(install_dir) => {
            let installer = java::Installer::new(install_dir);
            installer
                .install_class(value_class.package_name(), &generated_name, &source)
                .unwrap();
            if options.with_runtime {
                installer.install_adapter_runtime().unwrap();
            }
        }
    }
}
