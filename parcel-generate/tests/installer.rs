// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use parcel_generate::{
    java,
    test_utils::{self, accessor, nullable, value_class, with_adapter},
    SourceInstaller,
};
use parcel_reflection::{register, Registry};
use std::{path::Path, process::Command};
use tempfile::tempdir;

fn write_declarations(dir: &Path, registry: &Registry) -> std::path::PathBuf {
    let path = dir.join("types.yaml");
    std::fs::write(&path, serde_yaml::to_string(registry).unwrap()).unwrap();
    path
}

#[test]
fn test_install_class_and_runtime() {
    let dir = tempdir().unwrap();
    let installer = java::Installer::new(dir.path().to_path_buf());
    installer
        .install_class("test.nested", "AutoValue_Foo", "package test.nested;\n")
        .unwrap();
    installer.install_adapter_runtime().unwrap();

    let class = dir.path().join("test/nested/AutoValue_Foo.java");
    assert_eq!(
        std::fs::read_to_string(class).unwrap(),
        "package test.nested;\n"
    );
    let runtime = dir.path().join("com/parcelgen/adapter");
    let adapter = std::fs::read_to_string(runtime.join("TypeAdapter.java")).unwrap();
    assert!(adapter.contains("interface TypeAdapter<T>"));
    assert!(runtime.join("ParcelAdapter.java").exists());
}

#[test]
fn test_install_class_in_default_package() {
    let dir = tempdir().unwrap();
    let installer = java::Installer::new(dir.path().to_path_buf());
    installer
        .install_class("", "AutoValue_Foo", "final class AutoValue_Foo {}\n")
        .unwrap();
    assert!(dir.path().join("AutoValue_Foo.java").exists());
}

#[test]
fn test_cli_writes_class_and_runtime() {
    let dir = tempdir().unwrap();
    let mut registry = test_utils::get_fixtures();
    register(
        &mut registry,
        value_class(
            "test.Event",
            vec![
                accessor("name", "java.lang.String"),
                nullable(with_adapter(
                    accessor("start", "java.util.Date"),
                    "test.DateAdapter",
                )),
            ],
        ),
    );
    let input = write_declarations(dir.path(), &registry);
    let output_dir = dir.path().join("src");

    let status = Command::new(env!("CARGO_BIN_EXE_parcelgen"))
        .arg("--value-class")
        .arg("test.Event")
        .arg("--with-runtime")
        .arg("--target-source-dir")
        .arg(&output_dir)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let source = std::fs::read_to_string(output_dir.join("test/AutoValue_Event.java")).unwrap();
    assert!(source.starts_with("package test;\n"));
    assert!(source.contains("final class AutoValue_Event extends $AutoValue_Event {"));
    assert!(source.contains("DATE_ADAPTER.toParcel(start(), dest);"));
    assert!(output_dir
        .join("com/parcelgen/adapter/TypeAdapter.java")
        .exists());
}

#[test]
fn test_cli_prints_to_stdout() {
    let dir = tempdir().unwrap();
    let mut registry = test_utils::get_fixtures();
    register(
        &mut registry,
        value_class("test.Point", vec![accessor("x", "int")]),
    );
    let input = write_declarations(dir.path(), &registry);

    let output = Command::new(env!("CARGO_BIN_EXE_parcelgen"))
        .arg("--value-class")
        .arg("test.Point")
        .arg("--generated-name")
        .arg("Parcelable_Point")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let source = String::from_utf8(output.stdout).unwrap();
    assert!(source.contains("final class Parcelable_Point extends $Parcelable_Point {"));
    assert!(source.contains("dest.writeInt(x());"));
}

#[test]
fn test_cli_reports_unsupported_properties() {
    let dir = tempdir().unwrap();
    let mut registry = test_utils::get_fixtures();
    register(
        &mut registry,
        value_class(
            "test.Broken",
            vec![
                accessor("plain", "test.Plain"),
                accessor("other", "test.Plain"),
            ],
        ),
    );
    let input = write_declarations(dir.path(), &registry);

    let output = Command::new(env!("CARGO_BIN_EXE_parcelgen"))
        .arg("--value-class")
        .arg("test.Broken")
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("test.Broken#plain"));
    assert!(
        stderr.contains("Property plain of type test.Plain is not a supported Parcelable type.")
    );
    // Soft failures report every property.
    assert!(stderr.contains("test.Broken#other"));

    let output = Command::new(env!("CARGO_BIN_EXE_parcelgen"))
        .arg("--value-class")
        .arg("test.Broken")
        .arg("--strict")
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("test.Broken#plain"));
    assert!(!stderr.contains("test.Broken#other"));
}
