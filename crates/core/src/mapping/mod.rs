//! Field mapper: external (localized) payloads to internal records.
//!
//! Each importable type has a mapping function that reads the external
//! field names, validates them and builds the matching record. Foreign-key
//! existence is the only check left for the storage layer.

pub mod reader;

use serde_json::{Map, Value};

use crate::entity::EntityKind;
use crate::error::{CoreError, FieldErrors, NON_FIELD_ERRORS};
use crate::records::{
    AttributeNameRecord, AttributeRecord, AttributeValueRecord, CatalogRecord, ImageRecord,
    ImportRecord, ProductAttributesRecord, ProductImageRecord, ProductRecord,
};

pub use reader::{json_type_name, reject_blank_values, FieldReader};

/// Maximum length of short text columns.
pub const MAX_NAME_LENGTH: u64 = 255;

/// `cost` precision: `NUMERIC(15, 2)`.
pub const COST_MAX_DIGITS: u32 = 15;
pub const COST_DECIMAL_PLACES: u32 = 2;

/// Validate `payload` as a `kind` record and translate it to internal form.
pub fn map_record(kind: EntityKind, payload: &Value) -> Result<ImportRecord, CoreError> {
    let data = payload.as_object().ok_or_else(|| {
        CoreError::FieldValidation(FieldErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(payload)
            ),
        ))
    })?;

    reject_blank_values(data).map_err(CoreError::FieldValidation)?;

    let record = match kind {
        EntityKind::AttributeName => map_attribute_name(data).map(ImportRecord::AttributeName),
        EntityKind::AttributeValue => map_attribute_value(data).map(ImportRecord::AttributeValue),
        EntityKind::Attribute => map_attribute(data).map(ImportRecord::Attribute),
        EntityKind::Product => map_product(data).map(ImportRecord::Product),
        EntityKind::ProductAttributes => {
            map_product_attributes(data).map(ImportRecord::ProductAttributes)
        }
        EntityKind::Image => map_image(data).map(ImportRecord::Image),
        EntityKind::ProductImage => map_product_image(data).map(ImportRecord::ProductImage),
        EntityKind::Catalog => map_catalog(data).map(ImportRecord::Catalog),
    };
    record.map_err(CoreError::FieldValidation)
}

fn map_attribute_name(data: &Map<String, Value>) -> Result<AttributeNameRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let name = r.optional_text("nazev", Some(MAX_NAME_LENGTH));
    let code = r.optional_text("kod", Some(MAX_NAME_LENGTH));
    let display = r.flag("zobrazit", false);

    let errors = r.into_errors();
    match id {
        Some(id) if errors.is_empty() => Ok(AttributeNameRecord {
            id,
            name,
            code,
            display,
        }),
        _ => Err(errors),
    }
}

fn map_attribute_value(data: &Map<String, Value>) -> Result<AttributeValueRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let value = r.required_text("hodnota", Some(MAX_NAME_LENGTH));

    let errors = r.into_errors();
    match (id, value) {
        (Some(id), Some(value)) if errors.is_empty() => Ok(AttributeValueRecord { id, value }),
        _ => Err(errors),
    }
}

fn map_attribute(data: &Map<String, Value>) -> Result<AttributeRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let attribute_name_id = r.reference("nazev_atributu_id");
    let attribute_value_id = r.reference("hodnota_atributu_id");

    let errors = r.into_errors();
    match (id, attribute_name_id, attribute_value_id) {
        (Some(id), Some(attribute_name_id), Some(attribute_value_id)) if errors.is_empty() => {
            Ok(AttributeRecord {
                id,
                attribute_name_id,
                attribute_value_id,
            })
        }
        _ => Err(errors),
    }
}

fn map_product(data: &Map<String, Value>) -> Result<ProductRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let name = r.optional_text("nazev", Some(MAX_NAME_LENGTH));
    let description = r.optional_text("description", None);
    let cost = r.decimal("cena", COST_MAX_DIGITS, COST_DECIMAL_PLACES);
    let currency = r.currency("mena");
    let published_on = r.optional_datetime("published_on");
    let is_published = r.flag("is_published", false);

    let errors = r.into_errors();
    match id {
        Some(id) if errors.is_empty() => Ok(ProductRecord {
            id,
            name,
            description,
            cost,
            currency,
            published_on,
            is_published,
        }),
        _ => Err(errors),
    }
}

fn map_product_attributes(
    data: &Map<String, Value>,
) -> Result<ProductAttributesRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let attribute_id = r.reference("attribute");
    let product_id = r.reference("product");

    let errors = r.into_errors();
    match (id, attribute_id, product_id) {
        (Some(id), Some(attribute_id), Some(product_id)) if errors.is_empty() => {
            Ok(ProductAttributesRecord {
                id,
                attribute_id,
                product_id,
            })
        }
        _ => Err(errors),
    }
}

fn map_image(data: &Map<String, Value>) -> Result<ImageRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let image = r.url("obrazek");
    let name = r.optional_text("nazev", Some(MAX_NAME_LENGTH));

    let errors = r.into_errors();
    match (id, image) {
        (Some(id), Some(image)) if errors.is_empty() => Ok(ImageRecord { id, image, name }),
        _ => Err(errors),
    }
}

fn map_product_image(data: &Map<String, Value>) -> Result<ProductImageRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let product_id = r.reference("product");
    let image_id = r.reference("obrazek_id");
    let name = r.optional_text("nazev", Some(MAX_NAME_LENGTH));

    let errors = r.into_errors();
    match (id, product_id, image_id) {
        (Some(id), Some(product_id), Some(image_id)) if errors.is_empty() => {
            Ok(ProductImageRecord {
                id,
                product_id,
                image_id,
                name,
            })
        }
        _ => Err(errors),
    }
}

fn map_catalog(data: &Map<String, Value>) -> Result<CatalogRecord, FieldErrors> {
    let mut r = FieldReader::new(data);
    let id = r.id("id");
    let name = r.optional_text("nazev", Some(MAX_NAME_LENGTH));
    let image_id = r.optional_reference("obrazek_id");
    let product_ids = r.reference_list("products_ids", true);
    // Absent key: links untouched. Null or a list: links replaced.
    let attribute_ids = data
        .contains_key("attributes_ids")
        .then(|| r.reference_list("attributes_ids", false));

    let errors = r.into_errors();
    match (id, product_ids) {
        (Some(id), Some(product_ids)) if errors.is_empty() => Ok(CatalogRecord {
            id,
            name,
            image_id,
            product_ids,
            attribute_ids: attribute_ids.flatten(),
        }),
        _ => Err(errors),
    }
}
