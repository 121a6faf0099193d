// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use parcel_generate::{
    indent::IndentConfig,
    test_utils::{self, accessor, nullable, value_class, with_adapter},
    CodeGeneratorConfig, Error, FailureMode,
};
use parcel_reflection::{
    names, Annotation, DiagnosticKind, ElementPath, ExecutableElement, Modifier, PrimitiveKind, TypeElement,
    TypeRef, VariableElement,
};

fn generate_source(value_class: TypeElement) -> String {
    let name = value_class.name.clone();
    let registry = test_utils::get_registry(vec![value_class]);
    let (result, diagnostics) = test_utils::generate(&registry, &name, CodeGeneratorConfig::new());
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    result.unwrap().unwrap()
}

#[test]
fn test_primitives_and_presence_flags() {
    let source = generate_source(value_class(
        "test.Test",
        vec![
            accessor("a", "int"),
            nullable(accessor("b", "java.lang.Double")),
            accessor("c", "java.lang.String"),
            accessor("d", "long"),
        ],
    ));
    let expected = r#"package test;

import android.os.Parcel;
import android.os.Parcelable;

final class AutoValue_Test extends $AutoValue_Test {
  public static final Parcelable.Creator<AutoValue_Test> CREATOR = new Parcelable.Creator<AutoValue_Test>() {
    @Override
    public AutoValue_Test createFromParcel(Parcel in) {
      return new AutoValue_Test(
          in.readInt(),
          in.readInt() == 0 ? in.readDouble() : null,
          in.readString(),
          in.readLong()
      );
    }

    @Override
    public AutoValue_Test[] newArray(int size) {
      return new AutoValue_Test[size];
    }
  };

  AutoValue_Test(int a, Double b, String c, long d) {
    super(a, b, c, d);
  }

  @Override
  public void writeToParcel(Parcel dest, int flags) {
    dest.writeInt(a());
    if (b() == null) {
      dest.writeInt(1);
    } else {
      dest.writeInt(0);
      dest.writeDouble(b());
    }
    dest.writeString(c());
    dest.writeLong(d());
  }

  @Override
  public int describeContents() {
    return 0;
  }
}
"#;
    assert_eq!(source, expected);
}

#[test]
fn test_empty_value_class() {
    let source = generate_source(value_class("test.Empty", vec![]));
    assert!(source.contains("      return new AutoValue_Empty();\n"));
    assert!(source.contains("  AutoValue_Empty() {\n    super();\n  }\n"));
    assert!(!source.contains("ClassLoader"));
}

#[test]
fn test_describe_contents_is_not_overridden() {
    let int = TypeRef::Primitive(PrimitiveKind::Int);
    let source = generate_source(
        value_class("test.Named", vec![accessor("name", "java.lang.String")])
            .with_method(ExecutableElement::new("describeContents", int.clone())),
    );
    assert!(!source.contains("describeContents"));
    assert!(source.contains("AutoValue_Named(String name) {"));

    // Inherited implementations count too.
    let base = TypeElement::class("test.Base")
        .with_modifier(Modifier::Abstract)
        .implements(TypeRef::declared(names::PARCELABLE))
        .with_method(ExecutableElement::new("describeContents", int));
    let derived = TypeElement::class("test.Derived")
        .with_modifier(Modifier::Abstract)
        .extends(TypeRef::declared("test.Base"))
        .with_method(accessor("name", "java.lang.String"));
    let registry = test_utils::get_registry(vec![base, derived]);
    let (result, _) = test_utils::generate(&registry, "test.Derived", CodeGeneratorConfig::new());
    assert!(!result.unwrap().unwrap().contains("describeContents"));
}

#[test]
fn test_shared_adapters() {
    let source = generate_source(value_class(
        "test.Event",
        vec![
            nullable(with_adapter(
                accessor("start", "java.util.Date"),
                "test.DateAdapter",
            )),
            with_adapter(accessor("end", "java.util.Date"), "test.DateAdapter"),
            with_adapter(accessor("bar", "test.Plain"), "test.BarTypeAdapter"),
            with_adapter(accessor("other", "test.Plain"), "test.Creator"),
        ],
    ));
    assert!(source.contains(
        r#"final class AutoValue_Event extends $AutoValue_Event {
  private static final DateAdapter DATE_ADAPTER = new DateAdapter();
  private static final BarTypeAdapter BAR_TYPE_ADAPTER = new BarTypeAdapter();
  private static final test.Creator CREATOR_ = new test.Creator();

  public static final Parcelable.Creator<AutoValue_Event> CREATOR"#
    ));
    assert_eq!(source.matches("new DateAdapter()").count(), 1);
    assert!(source.contains(
        r#"      return new AutoValue_Event(
          in.readInt() == 0 ? DATE_ADAPTER.fromParcel(in) : null,
          DATE_ADAPTER.fromParcel(in),
          BAR_TYPE_ADAPTER.fromParcel(in),
          CREATOR_.fromParcel(in)
      );"#
    ));
    assert!(source.contains(
        r#"    if (start() == null) {
      dest.writeInt(1);
    } else {
      dest.writeInt(0);
      DATE_ADAPTER.toParcel(start(), dest);
    }
    DATE_ADAPTER.toParcel(end(), dest);
    BAR_TYPE_ADAPTER.toParcel(bar(), dest);
    CREATOR_.toParcel(other(), dest);"#
    ));
    assert!(source.contains("import java.util.Date;\n"));
    assert!(!source.contains("ClassLoader"));
}

#[test]
fn test_containers_and_special_types() {
    let source = generate_source(value_class(
        "test.Everything",
        vec![
            nullable(accessor("foos", "java.util.List<test.Foo>")),
            accessor("counts", "java.util.Map<java.lang.String, java.lang.Integer>"),
            accessor(
                "tags",
                "com.google.common.collect.ImmutableList<java.lang.String>",
            ),
            nullable(accessor("color", "test.Color")),
            accessor("kind", "test.Kind"),
            accessor("text", "java.lang.CharSequence"),
            accessor("blob", "byte[]"),
            accessor("labels", "java.lang.String[]"),
            nullable(accessor("extras", "android.os.Bundle")),
            accessor("value", "java.lang.Object"),
            accessor("s", "short"),
            nullable(accessor("boxed", "java.lang.Short")),
            accessor("flag", "boolean"),
            accessor("bar", "test.Bar"),
        ],
    ));
    assert!(source.contains(
        r#"import android.os.Bundle;
import android.os.Parcel;
import android.os.Parcelable;
import android.text.TextUtils;
import com.google.common.collect.ImmutableList;
import java.util.List;
import java.util.Map;
"#
    ));
    assert!(source.contains(
        r#"    @Override
    @SuppressWarnings("unchecked")
    public AutoValue_Everything createFromParcel(Parcel in) {
      ClassLoader cl = AutoValue_Everything.class.getClassLoader();
      return new AutoValue_Everything(
          (List<Foo>) in.readArrayList(cl),
          (Map<String, Integer>) in.readHashMap(cl),
          ImmutableList.<String>copyOf(in.readArrayList(cl)),
          in.readInt() == 0 ? Enum.valueOf(Color.class, in.readString()) : null,
          (Kind) in.readParcelable(cl),
          TextUtils.CHAR_SEQUENCE_CREATOR.createFromParcel(in),
          in.createByteArray(),
          in.createStringArray(),
          in.readBundle(cl),
          in.readValue(cl),
          (short) in.readInt(),
          in.readInt() == 0 ? (short) in.readInt() : null,
          in.readInt() == 1,
          (Bar) in.readParcelable(cl)
      );"#
    ));
    assert!(source.contains(
        r#"    dest.writeList(foos());
    dest.writeMap(counts());
    dest.writeList(tags().asList());
    if (color() == null) {
      dest.writeInt(1);
    } else {
      dest.writeInt(0);
      dest.writeString(color().name());
    }
    dest.writeParcelable(kind(), flags);
    TextUtils.writeToParcel(text(), dest, flags);
    dest.writeByteArray(blob());
    dest.writeStringArray(labels());
    dest.writeBundle(extras());
    dest.writeValue(value());
    dest.writeInt(s());
    if (boxed() == null) {
      dest.writeInt(1);
    } else {
      dest.writeInt(0);
      dest.writeInt(boxed().intValue());
    }
    dest.writeInt(flag() ? 1 : 0);
    dest.writeParcelable(bar(), flags);"#
    ));
}

#[test]
fn test_bounded_type_variables() {
    let bound = TypeRef::declared(names::PARCELABLE);
    let source = generate_source(
        value_class(
            "test.Gen",
            vec![accessor("item", "T extends android.os.Parcelable")],
        )
        .with_type_parameter(TypeRef::variable("T", Some(bound))),
    );
    assert!(source.contains(
        "final class AutoValue_Gen<T extends Parcelable> extends $AutoValue_Gen<T> {"
    ));
    assert!(source.contains(
        "public static final Parcelable.Creator<AutoValue_Gen> CREATOR = \
         new Parcelable.Creator<AutoValue_Gen>() {"
    ));
    assert!(source.contains("    @SuppressWarnings(\"unchecked\")\n"));
    assert!(source.contains("          (T) in.readParcelable(cl)\n"));
    assert!(source.contains("    dest.writeParcelable(item(), flags);\n"));
    assert!(source.contains("  AutoValue_Gen(T item) {\n"));

    // Without a bound, no encoding applies.
    let registry = test_utils::get_registry(vec![value_class(
        "test.Unbounded",
        vec![accessor("item", "T")],
    )
    .with_type_parameter(TypeRef::variable("T", None))]);
    let (result, diagnostics) = test_utils::plan(&registry, "test.Unbounded", FailureMode::Soft);
    assert!(result.unwrap().is_none());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_property_order_is_preserved() {
    let forward = generate_source(value_class(
        "test.Forward",
        vec![accessor("x", "long"), accessor("y", "java.lang.String")],
    ));
    let backward = generate_source(value_class(
        "test.Backward",
        vec![accessor("y", "java.lang.String"), accessor("x", "long")],
    ));
    let position = |source: &str, pattern: &str| source.find(pattern).unwrap();
    assert!(
        position(&forward, "dest.writeLong(x())") < position(&forward, "dest.writeString(y())")
    );
    assert!(position(&forward, "in.readLong()") < position(&forward, "in.readString()"));
    assert!(
        position(&backward, "dest.writeString(y())") < position(&backward, "dest.writeLong(x())")
    );
    assert!(position(&backward, "in.readString()") < position(&backward, "in.readLong()"));
    assert!(backward.contains("AutoValue_Backward(String y, long x) {"));
}

#[test]
fn test_get_and_is_prefixes() {
    let source = generate_source(value_class(
        "test.Bean",
        vec![
            accessor("getName", "java.lang.String"),
            accessor("isAwesome", "boolean"),
        ],
    ));
    assert!(source.contains("AutoValue_Bean(String name, boolean awesome) {"));
    assert!(source.contains("super(name, awesome);"));
    assert!(source.contains("dest.writeString(getName());"));
    assert!(source.contains("dest.writeInt(isAwesome() ? 1 : 0);"));

    let source = generate_source(value_class(
        "test.Mixed",
        vec![
            accessor("getName", "java.lang.String"),
            accessor("size", "int"),
        ],
    ));
    assert!(source.contains("AutoValue_Mixed(String getName, int size) {"));

    // Stripped names may be Java keywords.
    let source = generate_source(value_class(
        "test.K",
        vec![accessor("isNew", "boolean"), accessor("getDefault", "int")],
    ));
    assert!(source.contains("AutoValue_K(boolean new_, int default_) {"));
    assert!(source.contains("super(new_, default_);"));
    assert!(source.contains("dest.writeInt(isNew() ? 1 : 0);"));
    assert!(source.contains("dest.writeInt(getDefault());"));
}

#[test]
fn test_doc_comments() {
    let registry = test_utils::get_registry(vec![value_class(
        "test.Point",
        vec![accessor("x", "int")],
    )]);
    let config = CodeGeneratorConfig::new().with_comments(test_utils::get_doc_comments());
    let (result, _) = test_utils::generate(&registry, "test.Point", config);
    assert!(result.unwrap().unwrap().contains(
        r#"
/**
 * A point.
 *
 * Coordinates are in pixels.
 */
final class AutoValue_Point extends $AutoValue_Point {"#
    ));
}

#[test]
fn test_tab_indentation() {
    let registry = test_utils::get_registry(vec![value_class(
        "test.Point",
        vec![accessor("x", "int")],
    )]);
    let config = CodeGeneratorConfig::new().with_indent(IndentConfig::Tab);
    let (result, _) = test_utils::generate(&registry, "test.Point", config);
    assert!(result.unwrap().unwrap().contains(
        "\t@Override\n\tpublic void writeToParcel(Parcel dest, int flags) {\n\t\tdest.writeInt(x());\n\t}\n"
    ));
}

#[test]
fn test_invalid_map_keys() {
    let registry = test_utils::get_registry(vec![value_class(
        "test.Lookup",
        vec![
            accessor("name", "java.lang.String"),
            accessor(
                "table",
                "java.util.Map<android.os.Parcelable, java.lang.String>",
            ),
        ],
    )]);

    let config = CodeGeneratorConfig::new().with_failure_mode(FailureMode::Strict);
    let (result, diagnostics) = test_utils::generate(&registry, "test.Lookup", config);
    match result {
        Err(Error::InvalidMapType { class, property }) => {
            assert_eq!(class, "test.Lookup");
            assert_eq!(property, "table");
        }
        other => panic!("unexpected result {:?}", other),
    }
    let diagnostics = diagnostics.into_inner();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Error);
    assert_eq!(
        diagnostics[0].element,
        ElementPath::member("test.Lookup", "table")
    );
    assert!(diagnostics[0].message.starts_with("Maps can only have String objects for keys"));

    let (result, diagnostics) =
        test_utils::generate(&registry, "test.Lookup", CodeGeneratorConfig::new());
    assert!(result.unwrap().is_none());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_soft_and_strict_failures() {
    let registry = test_utils::get_registry(vec![value_class(
        "test.Broken",
        vec![
            accessor("first", "test.Plain"),
            accessor("ok", "int"),
            accessor("second", "test.Plain[]"),
        ],
    )]);

    let (result, diagnostics) = test_utils::plan(&registry, "test.Broken", FailureMode::Soft);
    assert!(result.unwrap().is_none());
    let members = diagnostics
        .errors()
        .map(|d| d.element.member.clone().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(members, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(
        diagnostics.iter().next().unwrap().message,
        "Property first of type test.Plain is not a supported Parcelable type."
    );

    let (result, diagnostics) = test_utils::plan(&registry, "test.Broken", FailureMode::Strict);
    match result {
        Err(Error::UnsupportedType { property, .. }) => assert_eq!(property, "first"),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_adapter_annotation_without_value() {
    let registry = test_utils::get_registry(vec![value_class(
        "test.X",
        vec![
            accessor("ok", "int"),
            accessor("method", "java.util.Date").with_annotation(Annotation::new(
                "com.parcelgen.adapter.ParcelAdapter",
            )),
        ],
    )]);

    let (result, diagnostics) = test_utils::plan(&registry, "test.X", FailureMode::Soft);
    assert!(result.unwrap().is_none());
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics.errors().next().unwrap();
    assert_eq!(diagnostic.element.to_string(), "test.X#method");
    assert_eq!(
        diagnostic.message,
        "Property method is annotated with @ParcelAdapter but does not name a TypeAdapter class."
    );

    let (result, _) = test_utils::plan(&registry, "test.X", FailureMode::Strict);
    match result {
        Err(Error::MissingAdapter { class, property }) => {
            assert_eq!(class, "test.X");
            assert_eq!(property, "method");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_conflicting_members() {
    let creator_type = TypeRef::parameterized(
        names::PARCELABLE_CREATOR,
        vec![TypeRef::declared("test.Manual")],
    );
    let write_to_parcel = ExecutableElement::new("writeToParcel", TypeRef::Void)
        .with_parameter("dest", TypeRef::declared(names::PARCEL))
        .with_parameter("flags", TypeRef::Primitive(PrimitiveKind::Int))
        .with_modifier(Modifier::Public);
    let manual = value_class("test.Manual", vec![accessor("x", "int")])
        .with_field(
            VariableElement::new("CREATOR", creator_type)
                .with_modifier(Modifier::Public)
                .with_modifier(Modifier::Static)
                .with_modifier(Modifier::Final),
        )
        .with_method(write_to_parcel.clone());
    let half = value_class("test.Half", vec![accessor("x", "int")]).with_method(write_to_parcel);
    let registry = test_utils::get_registry(vec![manual, half]);

    for mode in &[FailureMode::Soft, FailureMode::Strict] {
        let config = CodeGeneratorConfig::new().with_failure_mode(*mode);
        let (result, diagnostics) = test_utils::generate(&registry, "test.Manual", config);
        match result {
            Err(Error::ConflictingMember { class, member }) => {
                assert_eq!(class, "test.Manual");
                assert_eq!(member, "CREATOR");
            }
            other => panic!("unexpected result {:?}", other),
        }
        let elements = diagnostics
            .iter()
            .map(|d| d.element.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            elements,
            vec![
                "test.Manual#CREATOR".to_string(),
                "test.Manual#writeToParcel".to_string()
            ]
        );
    }

    let (result, diagnostics) =
        test_utils::generate(&registry, "test.Half", CodeGeneratorConfig::new());
    match result {
        Err(Error::ConflictingMember { member, .. }) => assert_eq!(member, "writeToParcel"),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(diagnostics.len(), 1);

    // A `CREATOR` declared by a superclass is reported on the superclass.
    let base = TypeElement::class("test.Base")
        .with_modifier(Modifier::Abstract)
        .implements(TypeRef::declared(names::PARCELABLE))
        .with_field(
            VariableElement::new(
                "CREATOR",
                TypeRef::parameterized(
                    names::PARCELABLE_CREATOR,
                    vec![TypeRef::declared("test.Base")],
                ),
            )
            .with_modifier(Modifier::Public)
            .with_modifier(Modifier::Static)
            .with_modifier(Modifier::Final),
        );
    let child = TypeElement::class("test.Child")
        .with_modifier(Modifier::Abstract)
        .extends(TypeRef::declared("test.Base"))
        .with_method(accessor("x", "int"));
    let registry = test_utils::get_registry(vec![base, child]);
    let (result, diagnostics) =
        test_utils::generate(&registry, "test.Child", CodeGeneratorConfig::new());
    match result {
        Err(Error::ConflictingMember { class, member }) => {
            assert_eq!(class, "test.Child");
            assert_eq!(member, "CREATOR");
        }
        other => panic!("unexpected result {:?}", other),
    }
    let elements = diagnostics
        .iter()
        .map(|d| d.element.to_string())
        .collect::<Vec<_>>();
    assert_eq!(elements, vec!["test.Base#CREATOR".to_string()]);
}

#[test]
fn test_applicable_requires_parcelable() {
    let plain = TypeElement::class("test.NotParcelable")
        .with_modifier(Modifier::Abstract)
        .with_method(accessor("x", "int"));
    let registry = test_utils::get_registry(vec![plain]);
    let extension = parcel_generate::ParcelExtension::new(CodeGeneratorConfig::new());
    let mut diagnostics = parcel_reflection::Diagnostics::new();
    let mut context = extension.context(
        &registry["test.NotParcelable"],
        &registry,
        &mut diagnostics,
    );
    assert!(!extension.applicable(&mut context).unwrap());
    assert!(extension.must_be_final());
    assert_eq!(
        extension.consume_properties(),
        vec!["describeContents", "writeToParcel"]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_independent_classes_in_threads() {
    let handles = (0..4)
        .map(|index| {
            std::thread::spawn(move || {
                let name = format!("test.Value{}", index);
                let registry = test_utils::get_registry(vec![value_class(
                    &name,
                    vec![
                        accessor("id", "long"),
                        nullable(accessor("label", "java.lang.String")),
                        nullable(accessor("foo", "test.Foo")),
                    ],
                )]);
                let (result, _) =
                    test_utils::generate(&registry, &name, CodeGeneratorConfig::new());
                result.unwrap().unwrap()
            })
        })
        .collect::<Vec<_>>();
    for (index, handle) in handles.into_iter().enumerate() {
        let source = handle.join().unwrap();
        assert!(source.contains(&format!(
            "final class AutoValue_Value{0} extends $AutoValue_Value{0} {{",
            index
        )));
        assert!(source.contains("dest.writeParcelable(foo(), flags);"));
        assert_eq!(source.matches("dest.writeInt(1);").count(), 1);
    }
}
