// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    encoding::{DEST, FLAGS, IN, LOADER},
    indent::IndentedWriter,
    property::{AdapterFieldBinding, EncodingPath, PropertyDescriptor},
    wrapper::{self, ParcelLayout, ReadFragment, WriteFragment},
    CodeGeneratorConfig,
};
use include_dir::include_dir as include_directory;
use parcel_reflection::{names, package_name, TypeRef};
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    io::{Result, Write},
    path::PathBuf,
    rc::Rc,
};

/// Name of the static factory field required by `Parcelable`.
pub const CREATOR: &str = "CREATOR";

/// Types of `java.lang` that are never imported. Other types with one of these simple names
/// are written with their qualified name.
const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassLoader",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "Object",
    "Override",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "Void",
];

/// Decides how type names are spelled in one generated file and collects its imports.
#[derive(Clone, Debug)]
pub struct ImportSet {
    package: String,
    reserved: HashSet<String>,
    /// Simple names already in use, with the qualified name of their top-level class.
    claimed: HashMap<String, String>,
    imports: BTreeSet<String>,
}

impl ImportSet {
    /// `reserved` lists simple names declared by the generated file itself.
    pub fn new(package: &str, reserved: &[&str]) -> Self {
        Self {
            package: package.to_string(),
            reserved: reserved.iter().map(|s| s.to_string()).collect(),
            claimed: HashMap::new(),
            imports: BTreeSet::new(),
        }
    }

    /// The spelling of a qualified class name, importing its top-level class when possible.
    pub fn name(&mut self, qualified_name: &str) -> String {
        let package = package_name(qualified_name);
        if package.is_empty() || package.len() == qualified_name.len() {
            return qualified_name.to_string();
        }
        let relative = &qualified_name[package.len() + 1..];
        let top = relative.split('.').next().unwrap_or(relative);
        let top_qualified = format!("{}.{}", package, top);

        if self.reserved.contains(top) {
            return qualified_name.to_string();
        }
        if package == "java.lang" && JAVA_LANG.contains(&top) {
            return relative.to_string();
        }
        if JAVA_LANG.contains(&top) {
            return qualified_name.to_string();
        }
        match self.claimed.get(top) {
            Some(owner) if *owner == top_qualified => (),
            Some(_) => return qualified_name.to_string(),
            None => {
                if package != self.package && package != "java.lang" {
                    self.imports.insert(top_qualified.clone());
                }
                self.claimed.insert(top.to_string(), top_qualified);
            }
        }
        relative.to_string()
    }

    /// Java source for a type.
    pub fn render(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "void".to_string(),
            TypeRef::Primitive(kind) => kind.keyword().to_string(),
            TypeRef::Declared { name, args } => {
                let mut result = self.name(name);
                if !args.is_empty() {
                    let args = args.iter().map(|a| self.render(a)).collect::<Vec<_>>();
                    result = format!("{}<{}>", result, args.join(", "));
                }
                result
            }
            TypeRef::Array(component) => format!("{}[]", self.render(component)),
            TypeRef::Variable { name, .. } => name.clone(),
        }
    }

    /// Declaration of a type parameter, e.g. `T extends Parcelable`.
    pub fn render_type_parameter(&mut self, variable: &TypeRef) -> String {
        match variable {
            TypeRef::Variable {
                name,
                bound: Some(bound),
            } => format!("{} extends {}", name, self.render(bound)),
            _ => self.render(variable),
        }
    }

    /// Qualified names to import, sorted.
    pub fn imports(&self) -> Vec<String> {
        self.imports.iter().cloned().collect()
    }
}

/// A property together with its validated encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedProperty {
    pub descriptor: PropertyDescriptor,
    pub path: EncodingPath,
}

/// Everything needed to print the implementation of a value class.
#[derive(Clone, Debug)]
pub struct ClassPlan {
    pub package_name: String,
    pub class_name: String,
    /// Simple name of the class to extend, in the same package.
    pub superclass: String,
    /// Qualified name of the value class, used to look up documentation.
    pub value_class: String,
    pub type_parameters: Vec<TypeRef>,
    pub is_final: bool,
    pub properties: Vec<PlannedProperty>,
    pub adapters: Vec<Rc<AdapterFieldBinding>>,
    /// Whether to implement `describeContents`.
    pub describe_contents: bool,
}

impl ClassPlan {
    /// The wire operations performed by `writeToParcel` and `createFromParcel`, in order.
    pub fn layout(&self) -> ParcelLayout {
        ParcelLayout {
            class_name: self.class_name.clone(),
            slots: self
                .properties
                .iter()
                .map(|p| wrapper::slot(&p.descriptor, &p.path))
                .collect(),
        }
    }
}

/// Main configuration object for the generation of `Parcelable` implementations.
pub struct CodeGenerator<'a> {
    config: &'a CodeGeneratorConfig,
}

struct JavaEmitter<'a, T> {
    out: IndentedWriter<T>,
    generator: &'a CodeGenerator<'a>,
    class: &'a ClassPlan,
    imports: ImportSet,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(config: &'a CodeGeneratorConfig) -> Self {
        Self { config }
    }

    /// Write the source file of `class`.
    pub fn output(&self, out: &mut dyn Write, class: &ClassPlan) -> Result<()> {
        // `Creator` is inherited from `Parcelable` by the generated class.
        let mut reserved = vec![
            class.class_name.as_str(),
            class.superclass.as_str(),
            "Creator",
        ];
        reserved.extend(class.type_parameters.iter().filter_map(|t| match t {
            TypeRef::Variable { name, .. } => Some(name.as_str()),
            _ => None,
        }));
        let mut emitter = JavaEmitter {
            out: IndentedWriter::new(Vec::new(), self.config.indent),
            generator: self,
            class,
            imports: ImportSet::new(&class.package_name, &reserved),
        };
        // The body is printed first so that its imports are known.
        emitter.output_class()?;
        let JavaEmitter { out: body, imports, .. } = emitter;

        if !class.package_name.is_empty() {
            writeln!(out, "package {};\n", class.package_name)?;
        }
        let imports = imports.imports();
        for import in &imports {
            writeln!(out, "import {};", import)?;
        }
        if !imports.is_empty() {
            writeln!(out)?;
        }
        out.write_all(&body.into_inner())
    }
}

impl<'a, T> JavaEmitter<'a, T>
where
    T: Write,
{
    fn output_class(&mut self) -> Result<()> {
        let parcel = self.imports.name(names::PARCEL);
        let creator = self.imports.name(names::PARCELABLE_CREATOR);
        let mut reads = Vec::new();
        let mut writes = Vec::new();
        for property in &self.class.properties {
            reads.push(wrapper::wrap_read(
                &property.descriptor,
                &property.path,
                &mut self.imports,
            ));
            writes.push(wrapper::wrap_write(
                &property.descriptor,
                &property.path,
                &mut self.imports,
            ));
        }

        self.output_comment()?;
        let class = self.class;
        let mut header = String::new();
        if class.is_final {
            header.push_str("final ");
        }
        header.push_str("class ");
        header.push_str(&class.class_name);
        if !class.type_parameters.is_empty() {
            let parameters = class
                .type_parameters
                .iter()
                .map(|t| self.imports.render_type_parameter(t))
                .collect::<Vec<_>>();
            header.push_str(&format!("<{}>", parameters.join(", ")));
        }
        header.push_str(" extends ");
        header.push_str(&class.superclass);
        if !class.type_parameters.is_empty() {
            let arguments = class
                .type_parameters
                .iter()
                .map(|t| self.imports.render(t))
                .collect::<Vec<_>>();
            header.push_str(&format!("<{}>", arguments.join(", ")));
        }
        self.out.open_block(&header)?;

        self.output_adapter_fields()?;
        self.output_creator(&creator, &parcel, &reads)?;
        writeln!(self.out)?;
        self.output_constructor()?;
        writeln!(self.out)?;
        self.output_write_to_parcel(&parcel, &writes)?;
        if class.describe_contents {
            writeln!(self.out)?;
            self.output_describe_contents()?;
        }
        self.out.close_block("")
    }

    fn output_comment(&mut self) -> Result<()> {
        if let Some(doc) = self.generator.config.comments.get(&self.class.value_class) {
            let text = textwrap::indent(doc, " * ").replace("\n\n", "\n *\n");
            writeln!(self.out, "/**\n{} */", text)?;
        }
        Ok(())
    }

    fn output_adapter_fields(&mut self) -> Result<()> {
        for adapter in &self.class.adapters {
            let ty = self.imports.render(&adapter.adapter_type);
            writeln!(
                self.out,
                "private static final {0} {1} = new {0}();",
                ty, adapter.field_name
            )?;
        }
        if !self.class.adapters.is_empty() {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn output_creator(
        &mut self,
        creator: &str,
        parcel: &str,
        reads: &[ReadFragment],
    ) -> Result<()> {
        let name = &self.class.class_name;
        self.out.open_block(&format!(
            "public static final {0}<{1}> {2} = new {0}<{1}>()",
            creator, name, CREATOR
        ))?;

        writeln!(self.out, "@Override")?;
        let generic = !self.class.type_parameters.is_empty();
        if generic || reads.iter().any(|r| r.unchecked_cast) {
            writeln!(self.out, "@SuppressWarnings(\"unchecked\")")?;
        }
        self.out.open_block(&format!(
            "public {} createFromParcel({} {})",
            name, parcel, IN
        ))?;
        if reads.iter().any(|r| r.requires_context) {
            let loader = self.imports.name("java.lang.ClassLoader");
            writeln!(
                self.out,
                "{} {} = {}.class.getClassLoader();",
                loader, LOADER, name
            )?;
        }
        if reads.is_empty() {
            writeln!(self.out, "return new {}();", name)?;
        } else {
            writeln!(self.out, "return new {}(", name)?;
            self.out.indent();
            self.out.indent();
            for (index, read) in reads.iter().enumerate() {
                let separator = if index + 1 < reads.len() { "," } else { "" };
                writeln!(self.out, "{}{}", read.code, separator)?;
            }
            self.out.unindent();
            self.out.unindent();
            writeln!(self.out, ");")?;
        }
        self.out.close_block("")?;

        writeln!(self.out)?;
        writeln!(self.out, "@Override")?;
        self.out.open_block(&format!("public {}[] newArray(int size)", name))?;
        writeln!(self.out, "return new {}[size];", name)?;
        self.out.close_block("")?;
        self.out.close_block(";")
    }

    fn output_constructor(&mut self) -> Result<()> {
        let mut parameters = Vec::new();
        let mut arguments = Vec::new();
        for property in &self.class.properties {
            let ty = self.imports.render(&property.descriptor.declared_type);
            parameters.push(format!("{} {}", ty, property.descriptor.name));
            arguments.push(property.descriptor.name.clone());
        }
        self.out.open_block(&format!(
            "{}({})",
            self.class.class_name,
            parameters.join(", ")
        ))?;
        writeln!(self.out, "super({});", arguments.join(", "))?;
        self.out.close_block("")
    }

    fn output_write_to_parcel(&mut self, parcel: &str, writes: &[WriteFragment]) -> Result<()> {
        writeln!(self.out, "@Override")?;
        self.out.open_block(&format!(
            "public void writeToParcel({} {}, int {})",
            parcel, DEST, FLAGS
        ))?;
        for write in writes {
            match &write.presence_guard {
                Some(accessor) => {
                    self.out.open_block(&format!("if ({} == null)", accessor))?;
                    writeln!(self.out, "{}.writeInt(1);", DEST)?;
                    self.out.continue_block("else")?;
                    writeln!(self.out, "{}.writeInt(0);", DEST)?;
                    writeln!(self.out, "{};", write.statement)?;
                    self.out.close_block("")?;
                }
                None => writeln!(self.out, "{};", write.statement)?,
            }
        }
        self.out.close_block("")
    }

    fn output_describe_contents(&mut self) -> Result<()> {
        writeln!(self.out, "@Override")?;
        self.out.open_block("public int describeContents()")?;
        writeln!(self.out, "return 0;")?;
        self.out.close_block("")
    }
}

/// Installer for generated source files in Java.
pub struct Installer {
    install_dir: PathBuf,
}

impl Installer {
    pub fn new(install_dir: PathBuf) -> Self {
        Installer { install_dir }
    }

    fn install_runtime(
        &self,
        source_dir: include_dir::Dir,
        path: &str,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir_path = self.install_dir.join(path);
        std::fs::create_dir_all(&dir_path)?;
        for entry in source_dir.files() {
            let mut file = std::fs::File::create(dir_path.join(entry.path()))?;
            file.write_all(entry.contents())?;
        }
        Ok(())
    }
}

impl crate::SourceInstaller for Installer {
    type Error = Box<dyn std::error::Error>;

    fn install_class(
        &self,
        package_name: &str,
        class_name: &str,
        source: &str,
    ) -> std::result::Result<(), Self::Error> {
        let mut dir_path = self.install_dir.clone();
        for part in package_name.split('.').filter(|p| !p.is_empty()) {
            dir_path = dir_path.join(part);
        }
        std::fs::create_dir_all(&dir_path)?;
        let mut file = std::fs::File::create(dir_path.join(format!("{}.java", class_name)))?;
        file.write_all(source.as_bytes())?;
        Ok(())
    }

    fn install_adapter_runtime(&self) -> std::result::Result<(), Self::Error> {
        self.install_runtime(
            include_directory!("runtime/java/com/parcelgen/adapter"),
            "com/parcelgen/adapter",
        )
    }
}
