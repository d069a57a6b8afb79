use log::debug;

use crate::{
    core::item::{ItemProcessor, ItemProcessorResult, Processed},
    error::{ImportError, ValidationError, ValidationKind},
    item::csv::RawRow,
};

use super::{
    culture::CultureResolver, record::NormalizedRecord, resolver::ReferenceResolver,
    type_lookup::TypeLookupTable,
};

pub const NAME_COLUMN: &str = "name";
pub const LOCATION_COLUMN: &str = "location";
pub const TYPE_COLUMN: &str = "type";
pub const CULTURE_COLUMN: &str = "culture";
pub const DESCRIPTION_SLUGS_COLUMN: &str = "descriptionSlugs";

pub const DEFAULT_MULTI_VALUE_DELIMITER: char = '|';

/// Splits a multi-value cell on `delimiter`, trims every part and drops the
/// empty ones. Order is preserved.
///
/// ```
/// use physical_object_import::physical_object::processor::split_multi_value;
///
/// assert_eq!(split_multi_value("a | b|  |c", '|'), vec!["a", "b", "c"]);
/// assert!(split_multi_value("   ", '|').is_empty());
/// ```
pub fn split_multi_value(value: &str, delimiter: char) -> Vec<&str> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Validates a [`RawRow`] and turns it into a [`NormalizedRecord`].
///
/// Rules, in the order their errors take precedence:
///
/// 1. every value is trimmed;
/// 2. a row without both name and location is fatal;
/// 3. the culture is resolved through the [`CultureResolver`], failing that
///    the row is fatal;
/// 4. a non empty type must exist in the [`TypeLookupTable`] for that
///    culture, otherwise the row is fatal;
/// 5. every description slug is resolved; the ones that can not be are
///    warnings and the record keeps the others.
///
/// Other columns are ignored. Processing only reads the lookup table and the
/// resolver, so the same row always yields the same result.
pub struct PhysicalObjectProcessor<'a> {
    type_lookup: TypeLookupTable,
    cultures: CultureResolver,
    multi_value_delimiter: char,
    references: Option<&'a dyn ReferenceResolver>,
}

impl PhysicalObjectProcessor<'_> {
    pub fn process_row(&self, row: &RawRow) -> ItemProcessorResult<NormalizedRecord> {
        let index = row.index();
        let name = row.value(NAME_COLUMN).trim();
        let location = row.value(LOCATION_COLUMN).trim();

        if name.is_empty() && location.is_empty() {
            return Err(ValidationError::fatal(
                ValidationKind::MissingRequiredField,
                index,
                "No name or location defined",
            ));
        }

        let culture = self.cultures.resolve(row.value(CULTURE_COLUMN)).ok_or_else(|| {
            ValidationError::fatal(
                ValidationKind::UndeterminedCulture,
                index,
                "Couldn't determine row culture",
            )
        })?;

        let type_id = self.lookup_type_id(row.value(TYPE_COLUMN), &culture, index)?;

        let (information_object_ids, warnings) =
            self.resolve_description_slugs(row.value(DESCRIPTION_SLUGS_COLUMN), index);

        let record = NormalizedRecord::new(
            name.to_owned(),
            (!location.is_empty()).then(|| location.to_owned()),
            culture,
            type_id,
            information_object_ids,
        );

        Ok(Processed::with_warnings(record, warnings))
    }

    pub fn type_lookup(&self) -> &TypeLookupTable {
        &self.type_lookup
    }

    pub fn culture_resolver(&self) -> &CultureResolver {
        &self.cultures
    }

    pub fn multi_value_delimiter(&self) -> char {
        self.multi_value_delimiter
    }

    fn lookup_type_id(
        &self,
        name: &str,
        culture: &str,
        index: usize,
    ) -> Result<Option<i64>, ValidationError> {
        let name = name.trim();

        // An empty type leaves the type unset
        if name.is_empty() {
            return Ok(None);
        }

        match self.type_lookup.lookup(culture, name) {
            Some(type_id) => Ok(Some(type_id)),
            None => Err(ValidationError::fatal(
                ValidationKind::UnknownType,
                index,
                format!(
                    "Couldn't find physical object type \"{}\" for culture \"{}\"",
                    name.to_lowercase(),
                    culture
                ),
            )),
        }
    }

    fn resolve_description_slugs(
        &self,
        value: &str,
        index: usize,
    ) -> (Vec<i64>, Vec<ValidationError>) {
        let mut ids = Vec::new();
        let mut warnings = Vec::new();

        for slug in split_multi_value(value, self.multi_value_delimiter) {
            match self.references.and_then(|references| references.resolve(slug)) {
                Some(id) => ids.push(id),
                None => {
                    debug!("Unresolved description slug {:?} on row {}", slug, index);
                    warnings.push(ValidationError::warning(
                        ValidationKind::UnresolvedReference,
                        index,
                        format!("Couldn't find a description with slug \"{}\".", slug),
                    ));
                }
            }
        }

        (ids, warnings)
    }
}

impl ItemProcessor<RawRow, NormalizedRecord> for PhysicalObjectProcessor<'_> {
    fn process(&self, item: &RawRow) -> ItemProcessorResult<NormalizedRecord> {
        self.process_row(item)
    }
}

pub struct PhysicalObjectProcessorBuilder<'a> {
    type_lookup: Option<TypeLookupTable>,
    cultures: CultureResolver,
    multi_value_delimiter: char,
    references: Option<&'a dyn ReferenceResolver>,
}

impl Default for PhysicalObjectProcessorBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PhysicalObjectProcessorBuilder<'a> {
    pub fn new() -> Self {
        Self {
            type_lookup: None,
            cultures: CultureResolver::default(),
            multi_value_delimiter: DEFAULT_MULTI_VALUE_DELIMITER,
            references: None,
        }
    }

    pub fn type_lookup(mut self, type_lookup: TypeLookupTable) -> Self {
        self.type_lookup = Some(type_lookup);
        self
    }

    pub fn default_culture(mut self, culture: Option<String>) -> Self {
        self.cultures.set_default_culture(culture);
        self
    }

    pub fn process_culture(mut self, culture: Option<String>) -> Self {
        self.cultures.set_process_culture(culture);
        self
    }

    pub fn multi_value_delimiter(mut self, delimiter: char) -> Self {
        self.multi_value_delimiter = delimiter;
        self
    }

    /// Without a resolver every description slug is reported as unresolved.
    pub fn references(mut self, references: &'a dyn ReferenceResolver) -> Self {
        self.references = Some(references);
        self
    }

    pub fn build(self) -> Result<PhysicalObjectProcessor<'a>, ImportError> {
        let type_lookup = self.type_lookup.ok_or_else(|| {
            ImportError::Configuration("no physical object type lookup table".to_string())
        })?;

        Ok(PhysicalObjectProcessor {
            type_lookup,
            cultures: self.cultures,
            multi_value_delimiter: self.multi_value_delimiter,
            references: self.references,
        })
    }
}
