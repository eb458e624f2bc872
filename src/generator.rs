//! The generation pass: one full walk over a type catalog.
//!
//! For each namespace, in sorted order: collect interface-implementation edges, render a
//! document per type (enums, classes, interfaces, structs, delegates, in that order),
//! write the namespace index, then drain the cross-reference graph into "Referenced by"
//! appendices. A namespace whose rendering fails is abandoned - its files are left
//! incomplete and the error recorded - but the run continues, so one bad doc string
//! cannot take down the documentation of unrelated namespaces.

use std::{
    collections::HashMap,
    fs::{File, OpenOptions},
    io::Write,
};

use crate::{
    catalog::{
        Documented, Event, Field, MemberFlags, Method, NamespaceMembers, Property, TypeCatalog,
        TypeDef, TypeKind, TypeName, TypeSignature,
    },
    options::Options,
    output::{MemberKind, Output},
    render::{
        code, link, resolve_references, CrossReferenceGraph, Formatter, MarkdownLinks, XmlLinks,
    },
    Error, Result,
};

/// Metadata name of instance constructors.
const CTOR_NAME: &str = ".ctor";

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct Report {
    /// Namespaces fully rendered
    pub processed: Vec<String>,
    /// Namespaces abandoned mid-render, with the error that stopped them
    pub failed: Vec<(String, Error)>,
}

impl Report {
    /// Whether every namespace rendered without error.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders a whole type catalog into markdown and XML documentation.
pub struct Generator<'a> {
    catalog: &'a TypeCatalog,
    options: &'a Options,
    output: Output,
    references: CrossReferenceGraph,
    interface_impls: HashMap<String, Vec<TypeName>>,
    current_namespace: String,
}

impl<'a> Generator<'a> {
    /// Create a generator over `catalog`, preparing the output directory.
    pub fn new(catalog: &'a TypeCatalog, options: &'a Options) -> Result<Self> {
        Ok(Generator {
            catalog,
            options,
            output: Output::new(options)?,
            references: CrossReferenceGraph::new(),
            interface_impls: HashMap::new(),
            current_namespace: String::new(),
        })
    }

    /// Run the full pass over every namespace in the catalog.
    pub fn run(mut self) -> Result<Report> {
        let catalog = self.catalog;
        let mut report = Report::default();
        for (namespace, members) in catalog.namespaces() {
            self.current_namespace.clone_from(namespace);
            match self.process_namespace(namespace, members) {
                Ok(()) => report.processed.push(namespace.clone()),
                Err(err) => {
                    log::error!("documentation for namespace {namespace} left incomplete: {err}");
                    let _ = self.output.finish_namespace();
                    report.failed.push((namespace.clone(), err));
                }
            }
        }
        Ok(report)
    }

    fn process_namespace(&mut self, namespace: &str, members: &NamespaceMembers) -> Result<()> {
        self.output.start_namespace(namespace)?;
        self.collect_interface_impls(members);

        for ty in &members.enums {
            if self.skip_experimental(ty) {
                continue;
            }
            self.process_enum(ty)?;
        }
        for ty in &members.classes {
            if self.skip_experimental(ty) {
                continue;
            }
            self.process_class(ty, TypeKind::Class)?;
        }
        for ty in &members.interfaces {
            if self.should_skip_interface(ty) {
                continue;
            }
            self.process_class(ty, TypeKind::Interface)?;
        }
        for ty in &members.structs {
            if self.skip_experimental(ty) {
                continue;
            }
            self.process_struct(ty)?;
        }
        for ty in &members.delegates {
            if self.skip_experimental(ty) {
                continue;
            }
            self.process_delegate(ty)?;
        }

        self.write_index(namespace, members)?;
        self.output.finish_namespace()?;
        self.append_back_references(namespace)
    }

    /// Collect interface → implementor edges before any type renders, so an interface
    /// processed before (or after) its implementors still lists all of them.
    fn collect_interface_impls(&mut self, members: &NamespaceMembers) {
        let mut impls: HashMap<String, Vec<TypeName>> = HashMap::new();
        for ty in members.classes.iter().chain(members.interfaces.iter()) {
            let skip = match ty.kind {
                TypeKind::Interface => self.should_skip_interface(ty),
                _ => self.skip_experimental(ty),
            };
            if skip {
                continue;
            }
            for iface in &ty.implements {
                if let Some(decl) = self.catalog.find(&iface.namespace, &iface.name) {
                    if self.should_skip_interface(decl) {
                        continue;
                    }
                }
                impls
                    .entry(iface.name.clone())
                    .or_default()
                    .push(ty.type_name());
            }
        }
        self.interface_impls = impls;
    }

    fn process_class(&mut self, ty: &TypeDef, kind: TypeKind) -> Result<()> {
        self.output.start_type(&ty.name, kind)?;
        let owner = ty.type_name();

        if let Some(extends) = &ty.extends {
            let rendered =
                self.formatter()
                    .type_to_markdown(&extends.namespace, &extends.name, false, "");
            if !rendered.is_empty() && rendered != "System.Object" {
                self.output.write(&format!("Extends: {rendered}\n\n"))?;
            }
        }

        if kind == TypeKind::Interface {
            let implementors: Vec<TypeName> = self
                .interface_impls
                .get(&ty.name)
                .cloned()
                .unwrap_or_default();
            if !implementors.is_empty() {
                let lines: Vec<String> = {
                    let fmt = self.formatter();
                    implementors
                        .iter()
                        .map(|imp| {
                            format!("- {}\n", fmt.type_to_markdown(&imp.namespace, &imp.name, true, ""))
                        })
                        .collect()
                };
                self.output.write("Implemented by: \n")?;
                for line in &lines {
                    self.output.write(line)?;
                }
            }
        }

        let mut first = true;
        for iface in &ty.implements {
            if let Some(decl) = self.catalog.find(&iface.namespace, &iface.name) {
                if self.should_skip_interface(decl) {
                    continue;
                }
            }
            let rendered =
                self.formatter()
                    .type_to_markdown(&iface.namespace, &iface.name, true, "");
            self.output.write(if first { "Implements: " } else { ", " })?;
            self.output.write(&rendered)?;
            first = false;
        }
        self.output.write("\n\n")?;

        self.optional_sections(MemberKind::Type, ty, &ty.name, None)?;

        let mut properties: Vec<&Property> = ty
            .properties
            .iter()
            .filter(|p| !self.skip_experimental(*p))
            .collect();
        properties.sort_by(|a, b| a.name.cmp(&b.name));
        if !properties.is_empty() {
            self.section("Properties", |g| {
                if g.options.properties_as_table {
                    g.output
                        .write("|   | Name|Type|Description|\n|---|-----|----|-----------|\n")?;
                }
                for property in &properties {
                    g.process_property(property, ty)?;
                }
                Ok(())
            })?;
        }
        self.output.write("\n")?;

        let mut methods: Vec<&Method> = ty
            .methods
            .iter()
            .filter(|m| !self.skip_experimental(*m))
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        if methods
            .iter()
            .any(|m| m.flags.contains(MemberFlags::SPECIAL_NAME) && m.name == CTOR_NAME)
        {
            self.section("Constructors", |g| {
                for method in &methods {
                    if method.flags.contains(MemberFlags::SPECIAL_NAME) && method.name == CTOR_NAME
                    {
                        g.process_method(method, ty, Some(&ty.name))?;
                    }
                }
                Ok(())
            })?;
        }
        self.output.write("\n")?;

        if methods
            .iter()
            .any(|m| !m.flags.contains(MemberFlags::SPECIAL_NAME))
        {
            self.section("Methods", |g| {
                for method in &methods {
                    if method.flags.contains(MemberFlags::SPECIAL_NAME) {
                        // get_ / put_ accessors already rendered as properties
                        log::debug!("skipping special method {}", method.name);
                        continue;
                    }
                    g.process_method(method, ty, None)?;
                }
                Ok(())
            })?;
        }
        self.output.write("\n")?;

        let mut events: Vec<&Event> = ty
            .events
            .iter()
            .filter(|e| !self.skip_experimental(*e))
            .collect();
        events.sort_by(|a, b| a.name.cmp(&b.name));
        if !events.is_empty() {
            self.section("Events", |g| {
                for event in &events {
                    let heading = code(&event.name);
                    g.section(&heading, |g| {
                        let rendered = g.display_signature(&event.event_type)?;
                        g.output.write(&format!("Type: {rendered}\n"))?;
                        g.references.add_signature(&event.event_type, &owner);
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn process_property(&mut self, property: &Property, owner: &TypeDef) -> Result<()> {
        let owner_name = owner.type_name();
        let rendered_type = self.display_signature(&property.signature)?;
        self.references
            .add_signature(&property.signature, &owner_name);

        let getter = owner.find_method(&format!("get_{}", property.name));
        let setter = owner.find_method(&format!("put_{}", property.name));
        let is_static = getter.is_some_and(|m| m.flags.contains(MemberFlags::STATIC))
            || setter.is_some_and(|m| m.flags.contains(MemberFlags::STATIC));
        let read_only = !setter.is_some_and(|m| m.flags.contains(MemberFlags::PUBLIC));

        let mut qualifiers = String::new();
        if is_static {
            qualifiers.push_str(&code("static"));
            qualifiers.push_str("   ");
        }
        if read_only {
            qualifiers.push_str(&code("readonly"));
            qualifiers.push(' ');
        }

        if self.options.properties_as_table {
            let mut description = property.doc_string().unwrap_or_default();
            if let Some(default_value) = property.doc_default() {
                description.push_str("<br/>default: ");
                description.push_str(&code(&default_value));
            }
            self.output.write(&format!(
                "| {}| {} | {} | {} | \n",
                qualifiers,
                code(&property.name),
                rendered_type,
                description
            ))?;
            Ok(())
        } else {
            let xml_name = format!("{}.{}", owner.name, property.name);
            self.section(&property.name, |g| {
                g.output.write(&format!(
                    "{} {} {}\n\n",
                    qualifiers,
                    rendered_type,
                    code(&property.name)
                ))?;
                g.optional_sections(
                    MemberKind::Property,
                    property,
                    &xml_name,
                    getter.map(|m| m as &dyn Documented),
                )
            })
        }
    }

    fn process_method(
        &mut self,
        method: &Method,
        owner: &TypeDef,
        real_name: Option<&str>,
    ) -> Result<()> {
        let owner_name = owner.type_name();
        // Constructors render without a return type; everything else defaults to void.
        let return_type = match real_name {
            Some(_) => String::new(),
            None => match &method.signature.return_type {
                Some(ret) => {
                    self.references.add_signature(ret, &owner_name);
                    self.display_signature(ret)?
                }
                None => "void".to_string(),
            },
        };
        let name = real_name.unwrap_or(&method.name);

        let mut rendered = String::new();
        if method.flags.contains(MemberFlags::STATIC) {
            rendered.push_str(&code("static"));
            rendered.push(' ');
        }
        rendered.push_str(&format!("{} **{}**(", return_type, code(name)));
        for (i, param) in method.signature.params.iter().enumerate() {
            if i != 0 {
                rendered.push_str(", ");
            }
            if param.by_ref {
                rendered.push_str("**out** ");
            }
            rendered.push_str(&self.display_signature(&param.signature)?);
            rendered.push(' ');
            rendered.push_str(&param.name);
            self.references.add_signature(&param.signature, &owner_name);
        }
        rendered.push(')');

        let xml_name = format!("{}.{}", owner.name, name);
        self.section(name, |g| {
            g.output.write(&rendered)?;
            g.output.write("\n\n")?;
            g.optional_sections(MemberKind::Method, method, &xml_name, None)?;
            g.output.write("\n\n")?;
            Ok(())
        })
    }

    fn process_field(&mut self, field: &Field, owner: &TypeDef) -> Result<()> {
        let owner_name = owner.type_name();
        let rendered = self.display_signature(&field.signature)?;
        if self.options.fields_as_table {
            let description = field.doc_string().unwrap_or_default();
            self.output
                .write(&format!("| {} | {} | {} |\n", field.name, rendered, description))?;
            Ok(())
        } else {
            self.references.add_signature(&field.signature, &owner_name);
            let type_text = match &field.signature {
                TypeSignature::Named(_) | TypeSignature::GenericInst { .. } => rendered,
                _ => code(&rendered),
            };
            let xml_name = format!("{}.{}", owner.name, field.name);
            self.section(&field.name, |g| {
                g.output.write(&format!("Type: {type_text}\n\n"))?;
                g.optional_sections(MemberKind::Field, field, &xml_name, None)
            })
        }
    }

    fn process_struct(&mut self, ty: &TypeDef) -> Result<()> {
        self.output.start_type(&ty.name, TypeKind::Struct)?;
        self.optional_sections(MemberKind::Type, ty, &ty.name, None)?;

        let mut fields: Vec<&Field> = ty.fields.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        self.section("Fields", |g| {
            if g.options.fields_as_table {
                g.output.write("| Name | Type | Description |\n|---|---|---|\n")?;
            }
            for field in &fields {
                if g.skip_experimental(*field) {
                    continue;
                }
                g.process_field(field, ty)?;
            }
            Ok(())
        })
    }

    fn process_delegate(&mut self, ty: &TypeDef) -> Result<()> {
        self.output.start_type(&ty.name, TypeKind::Delegate)?;
        self.optional_sections(MemberKind::Type, ty, &ty.name, None)?;
        for method in &ty.methods {
            if method.flags.contains(MemberFlags::SPECIAL_NAME) && method.name == "Invoke" {
                if self.skip_experimental(method) {
                    continue;
                }
                self.process_method(method, ty, None)?;
            }
        }
        Ok(())
    }

    fn process_enum(&mut self, ty: &TypeDef) -> Result<()> {
        self.output.start_type(&ty.name, TypeKind::Enum)?;
        self.optional_sections(MemberKind::Type, ty, &ty.name, None)?;

        self.output.write("| Name |  Value | Description |\n|--|--|--|\n")?;
        for value in &ty.fields {
            if value.flags.contains(MemberFlags::SPECIAL_NAME) {
                continue;
            }
            let raw = value.constant.unwrap_or(0) as u32;
            let description = value.doc_string().unwrap_or_default();
            self.output.write(&format!(
                "|{} | 0x{:x}  |  {}|\n",
                code(&value.name),
                raw,
                description
            ))?;
        }
        Ok(())
    }

    /// Emit the banners, default value and description shared by every documented item,
    /// and mirror the description into the XML stream.
    ///
    /// `fallback` covers properties, whose deprecation attribute may live on the getter
    /// instead of the property itself.
    fn optional_sections(
        &mut self,
        kind: MemberKind,
        item: &dyn Documented,
        xml_name: &str,
        fallback: Option<&dyn Documented>,
    ) -> Result<()> {
        if item.is_experimental() {
            self.output.write("> **EXPERIMENTAL**\n\n")?;
        }

        let mut deprecated = item.deprecated_message();
        if deprecated.is_none() {
            if let Some(fallback) = fallback {
                deprecated = fallback.deprecated_message();
            }
        }
        if let Some(message) = deprecated {
            let resolved = self.resolve_markdown(&message)?;
            self.output
                .write(&format!("> **Deprecated**: {resolved}\n\n"))?;
        }

        if let Some(default_value) = item.doc_default() {
            self.output
                .write(&format!("**Default value**: {}\n\n", code(&default_value)))?;
        }

        if let Some(doc) = item.doc_string() {
            let markdown = self.resolve_markdown(&doc)?;
            self.output.write(&markdown)?;
            self.output.write("\n\n")?;
            let xml = self.resolve_xml(&doc)?;
            self.output.add_xml_member(kind, xml_name, &xml)?;
        }
        Ok(())
    }

    fn write_index(&mut self, namespace: &str, members: &NamespaceMembers) -> Result<()> {
        let mut index = File::create(self.output.path_for_type("index"))?;
        let prefix = self.options.version_prefix();
        write!(
            index,
            "---\nid: {prefix}Native-API-Reference\ntitle: namespace {namespace}\nsidebar_label: Full reference\n"
        )?;
        if self.options.api_version.is_some() {
            writeln!(index, "original_id: Native-API-Reference")?;
        }
        write!(index, "\n---\n\n")?;

        self.write_index_section(&mut index, "Enums", &members.enums)?;
        self.write_index_section(&mut index, "Interfaces", &members.interfaces)?;
        self.write_index_section(&mut index, "Structs", &members.structs)?;
        self.write_index_section(&mut index, "Classes", &members.classes)?;
        self.write_index_section(&mut index, "Delegates", &members.delegates)?;
        Ok(())
    }

    fn write_index_section(
        &self,
        index: &mut File,
        heading: &str,
        types: &[TypeDef],
    ) -> Result<()> {
        writeln!(index, "## {heading}")?;
        for ty in types {
            let skip = match ty.kind {
                TypeKind::Interface => self.should_skip_interface(ty),
                _ => self.skip_experimental(ty),
            };
            if skip {
                continue;
            }
            writeln!(index, "{}", link(&ty.name))?;
        }
        Ok(())
    }

    fn append_back_references(&mut self, namespace: &str) -> Result<()> {
        let drained = self.references.drain(namespace);
        if self.options.print_reference_graph && !drained.is_empty() {
            log::info!("Reference graph:");
        }
        for (target, owners) in &drained {
            let path = self.output.path_for_type(target);
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            write!(file, "\n\n## Referenced by\n")?;
            for owner in owners {
                writeln!(file, "{}", link(owner))?;
            }
            if self.options.print_reference_graph {
                log::info!("{target} <-- {}", owners.join("  "));
            }
        }
        Ok(())
    }

    fn section<R>(
        &mut self,
        heading: &str,
        body: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.output.enter_section(heading)?;
        let result = body(self);
        self.output.exit_section();
        result
    }

    fn skip_experimental(&self, item: &dyn Documented) -> bool {
        !self.options.output_experimental && item.is_experimental()
    }

    fn should_skip_interface(&self, ty: &TypeDef) -> bool {
        self.skip_experimental(ty)
            || ty.has_attribute("StaticAttribute")
            || ty.has_attribute("ExclusiveToAttribute")
    }

    fn formatter(&self) -> Formatter<'_> {
        Formatter::new(&self.current_namespace, self.options)
    }

    fn display_signature(&self, signature: &TypeSignature) -> Result<String> {
        self.formatter().display_type(signature, true)
    }

    fn resolve_markdown(&self, text: &str) -> Result<String> {
        resolve_references(
            text,
            &MarkdownLinks::new(self.formatter()),
            self.catalog,
            &self.current_namespace,
            self.options,
        )
    }

    fn resolve_xml(&self, text: &str) -> Result<String> {
        resolve_references(
            text,
            &XmlLinks::new(&self.current_namespace),
            self.catalog,
            &self.current_namespace,
            self.options,
        )
    }
}
