//! Schema declaration and resolution for bindable record types
//!
//! A record type describes itself once through [`Record::describe`], which
//! registers an ordered list of [`FieldBinding`]s with typed accessor
//! closures. [`SchemaDescriptor::of`] turns that declaration into an
//! immutable, validated descriptor; [`SchemaCache`] keeps one descriptor per
//! type so the declaration is never re-derived per call.
//!
//! ## Components
//!
//! - [`constraint`] - Constraint declarations attached to fields
//! - [`cache`] - Per-type descriptor memoization
//! - [`document`] - TOML schema documents and [`DynamicRecord`]
//!
//! ## Usage
//!
//! ```rust
//! use record_binder::app::schema::{FieldSet, FileSource, Record};
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     name: Option<String>,
//!     age: i32,
//! }
//!
//! impl Record for Customer {
//!     fn file_source() -> Option<FileSource> {
//!         Some(FileSource::new(","))
//!     }
//!
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields
//!             .column(0, "name", |c| &c.name, |c| &mut c.name)
//!             .not_null("name is required");
//!         fields
//!             .column(1, "age", |c| &c.age, |c| &mut c.age)
//!             .range(18.0, 122.0, "age out of range");
//!     }
//! }
//! ```

pub mod cache;
pub mod constraint;
pub mod document;

#[cfg(test)]
pub mod tests;

pub use cache::SchemaCache;
pub use constraint::{Constraint, ConstraintKind};
pub use document::{ConstraintDocument, DynamicRecord, FieldDocument, SchemaDocument};

use crate::app::models::{BindValue, FieldType, FieldValue};
use crate::constants::DEFAULT_COMMENT_PREFIX;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Reads a field's current value; `Err` means the field could not be read
pub type Reader<T> =
    Box<dyn Fn(&T) -> std::result::Result<Option<FieldValue>, String> + Send + Sync>;

/// Stores a converted value into a field; `Err` carries the rejection reason
pub type Writer<T> =
    Box<dyn Fn(&mut T, Option<FieldValue>) -> std::result::Result<(), String> + Send + Sync>;

/// A type that can be bound from delimited lines and validated
pub trait Record: Default + 'static {
    /// File-level metadata; `None` when the type is not bound to a file format
    fn file_source() -> Option<FileSource> {
        None
    }

    /// Register field bindings in declaration order
    fn describe(fields: &mut FieldSet<Self>);
}

/// Delimiter and comment conventions of a file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSource {
    /// Literal token separator
    pub delimiter: String,
    /// Lines whose trimmed form starts with any of these are skipped
    pub comment_prefixes: Vec<String>,
}

impl FileSource {
    /// File source with the default comment prefix
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            comment_prefixes: vec![DEFAULT_COMMENT_PREFIX.to_string()],
        }
    }

    /// Replace the comment prefixes
    pub fn with_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a raw line is a comment line
    pub fn is_comment(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.comment_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
    }

    fn check(&self, type_name: &str) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_schema(type_name, "delimiter must not be empty"));
        }
        if self.comment_prefixes.iter().any(String::is_empty) {
            return Err(Error::invalid_schema(
                type_name,
                "comment prefixes must not be empty",
            ));
        }
        Ok(())
    }
}

/// Association between a record field, its source column, its target type
/// and its constraints
pub struct FieldBinding<T> {
    name: String,
    column: Option<usize>,
    field_type: FieldType,
    constraints: Vec<Constraint>,
    reader: Reader<T>,
    writer: Option<Writer<T>>,
}

impl<T> FieldBinding<T> {
    /// Build a binding from raw accessors
    ///
    /// Prefer the typed helpers on [`FieldSet`]; this exists for records whose
    /// layout is only known at run time.
    pub fn new(
        name: impl Into<String>,
        column: Option<usize>,
        field_type: FieldType,
        reader: Reader<T>,
        writer: Option<Writer<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            column,
            field_type,
            constraints: Vec::new(),
            reader,
            writer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based column index, `None` for validated-only fields
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Read the field's current value without mutating the record
    pub fn read(&self, record: &T) -> std::result::Result<Option<FieldValue>, String> {
        (self.reader)(record)
    }

    /// Store a converted value into the field
    pub fn write(
        &self,
        record: &mut T,
        value: Option<FieldValue>,
    ) -> std::result::Result<(), String> {
        match &self.writer {
            Some(writer) => writer(record, value),
            None => Err(format!("field '{}' is not writable", self.name)),
        }
    }

    /// Attach a constraint
    pub fn push_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("field_type", &self.field_type)
            .field("constraints", &self.constraints)
            .field("writable", &self.writer.is_some())
            .finish()
    }
}

/// Builder collecting a record type's field bindings
pub struct FieldSet<T> {
    bindings: Vec<FieldBinding<T>>,
    errors: Vec<String>,
}

impl<T> Default for FieldSet<T> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T: 'static> FieldSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a typed field to a column
    pub fn column<V, G, M>(
        &mut self,
        index: usize,
        name: &str,
        get: G,
        get_mut: M,
    ) -> FieldDecl<'_, T>
    where
        V: BindValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let reader: Reader<T> =
            Box::new(move |record: &T| Ok::<_, String>(get(record).to_value()));
        let writer: Writer<T> = Box::new(
            move |record: &mut T, value: Option<FieldValue>| -> std::result::Result<(), String> {
                *get_mut(record) = V::from_value(value)?;
                Ok(())
            },
        );
        self.bind(FieldBinding::new(
            name,
            Some(index),
            V::field_type(),
            reader,
            Some(writer),
        ))
    }

    /// Declare a field that is validated but not bound to a column
    pub fn field<V, G>(&mut self, name: &str, get: G) -> FieldDecl<'_, T>
    where
        V: BindValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        let reader: Reader<T> =
            Box::new(move |record: &T| Ok::<_, String>(get(record).to_value()));
        self.bind(FieldBinding::new(name, None, V::field_type(), reader, None))
    }

    /// Declare a validated-only field whose reader may fail
    pub fn computed<F>(&mut self, name: &str, field_type: FieldType, read: F) -> FieldDecl<'_, T>
    where
        F: Fn(&T) -> std::result::Result<Option<FieldValue>, String> + Send + Sync + 'static,
    {
        self.bind(FieldBinding::new(name, None, field_type, Box::new(read), None))
    }

    /// Register a prebuilt binding
    pub fn bind(&mut self, binding: FieldBinding<T>) -> FieldDecl<'_, T> {
        self.bindings.push(binding);
        let index = self.bindings.len() - 1;
        FieldDecl { set: self, index }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Handle for chaining constraints onto the most recent binding
pub struct FieldDecl<'a, T> {
    set: &'a mut FieldSet<T>,
    index: usize,
}

impl<T> FieldDecl<'_, T> {
    pub fn constraint(self, constraint: Constraint) -> Self {
        self.set.bindings[self.index].push_constraint(constraint);
        self
    }

    pub fn not_null(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::not_null(message))
    }

    /// Inclusive numeric range
    pub fn range(self, min: f64, max: f64, message: impl Into<String>) -> Self {
        self.constraint(Constraint::range(min, max, message))
    }

    /// Inclusive lower bound with the default upper bound
    pub fn min(self, min: f64, message: impl Into<String>) -> Self {
        self.constraint(Constraint::min(min, message))
    }

    /// Full-match pattern; an invalid pattern fails schema resolution
    pub fn regex(self, pattern: &str, message: impl Into<String>) -> Self {
        match Constraint::regex(pattern, message) {
            Ok(constraint) => self.constraint(constraint),
            Err(e) => {
                let field = self.set.bindings[self.index].name.clone();
                self.set
                    .errors
                    .push(format!("invalid pattern for field '{}': {}", field, e));
                self
            }
        }
    }
}

/// Resolved, immutable parsing and validation metadata for one record type
#[derive(Debug)]
pub struct SchemaDescriptor<T> {
    type_name: String,
    source: Option<FileSource>,
    fields: Vec<FieldBinding<T>>,
}

impl<T: Record> SchemaDescriptor<T> {
    /// Resolve the descriptor declared by `T`
    pub fn of() -> Result<Self> {
        let mut fields = FieldSet::new();
        T::describe(&mut fields);
        Self::from_parts(short_type_name::<T>(), T::file_source(), fields)
    }
}

impl<T> SchemaDescriptor<T> {
    /// Validate and assemble a descriptor
    pub fn from_parts(
        type_name: impl Into<String>,
        source: Option<FileSource>,
        fields: FieldSet<T>,
    ) -> Result<Self> {
        let type_name = type_name.into();

        if let Some(message) = fields.errors.first() {
            return Err(Error::invalid_schema(&type_name, message.clone()));
        }
        if let Some(source) = &source {
            source.check(&type_name)?;
        }

        let mut names = HashSet::new();
        let mut columns = HashSet::new();
        for binding in &fields.bindings {
            if !names.insert(binding.name.as_str()) {
                return Err(Error::invalid_schema(
                    &type_name,
                    format!("field '{}' is declared more than once", binding.name),
                ));
            }
            if let Some(column) = binding.column {
                if !columns.insert(column) {
                    return Err(Error::invalid_schema(
                        &type_name,
                        format!(
                            "column {} is bound more than once (field '{}')",
                            column, binding.name
                        ),
                    ));
                }
                if binding.writer.is_none() {
                    return Err(Error::invalid_schema(
                        &type_name,
                        format!("field '{}' is bound to a column but not writable", binding.name),
                    ));
                }
            }
        }

        Ok(Self {
            type_name,
            source,
            fields: fields.bindings,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn file_source(&self) -> Option<&FileSource> {
        self.source.as_ref()
    }

    /// File source, or [`Error::MissingSchema`] when the type declares none
    pub fn require_file_source(&self) -> Result<&FileSource> {
        self.source
            .as_ref()
            .ok_or_else(|| Error::missing_schema(&self.type_name))
    }

    /// All declared fields in declaration order
    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }

    /// Fields bound to a column, in declaration order
    pub fn bound_fields(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.fields.iter().filter(|field| field.column.is_some())
    }

    pub fn field(&self, name: &str) -> Option<&FieldBinding<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Smallest token count that satisfies every bound column
    pub fn min_columns(&self) -> usize {
        self.bound_fields()
            .filter_map(FieldBinding::column)
            .map(|column| column + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Type name without its module path
pub fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{}{}", short, &full[base.len()..])
}
