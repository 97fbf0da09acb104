//! Integration tests for the catalog repositories.
//!
//! Exercises upserts, detail composition, link replacement, cascade
//! deletes and id existence checks against a real database.

use catalog_core::entity::{EntityKind, Representation};
use catalog_core::records::{
    AttributeNameRecord, AttributeRecord, AttributeValueRecord, CatalogRecord, ImageRecord,
    ImportRecord, ProductAttributesRecord, ProductImageRecord, ProductRecord,
};
use catalog_db::models::entity::EntityView;
use catalog_db::repositories::{
    AttributeNameRepo, AttributeRepo, CatalogRepo, EntityRepo, ImageRepo, ProductAttributesRepo,
    ProductImageRepo, ProductRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(id: i64, name: &str) -> ProductRecord {
    ProductRecord {
        id,
        name: Some(name.to_string()),
        description: None,
        cost: Some(Decimal::new(19900, 2)),
        currency: Some("CZK".to_string()),
        published_on: None,
        is_published: false,
    }
}

fn new_image(id: i64) -> ImageRecord {
    ImageRecord {
        id,
        image: format!("https://cdn.example.com/{id}.jpg"),
        name: None,
    }
}

/// Seed attribute name 1, value 1 and attribute 1 pairing them.
async fn seed_attribute(pool: &PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let records = [
        ImportRecord::AttributeName(AttributeNameRecord {
            id: 1,
            name: Some("Barva".into()),
            code: Some("color".into()),
            display: true,
        }),
        ImportRecord::AttributeValue(AttributeValueRecord {
            id: 1,
            value: "modrá".into(),
        }),
        ImportRecord::Attribute(AttributeRecord {
            id: 1,
            attribute_name_id: 1,
            attribute_value_id: 1,
        }),
    ];
    for record in &records {
        EntityRepo::upsert(&mut conn, record).await.unwrap();
    }
}

// ---------------------------------------------------------------------------
// Upserts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_inserts_then_replaces_every_column(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let created = ProductRepo::upsert(&mut conn, &new_product(7, "Mug")).await.unwrap();
    assert_eq!(created.name.as_deref(), Some("Mug"));
    assert_eq!(created.cost, Some(Decimal::new(19900, 2)));

    let replacement = ProductRecord {
        id: 7,
        name: Some("Big mug".into()),
        description: None,
        cost: None,
        currency: None,
        published_on: None,
        is_published: true,
    };
    let updated = ProductRepo::upsert(&mut conn, &replacement).await.unwrap();
    assert_eq!(updated.name.as_deref(), Some("Big mug"));
    assert_eq!(updated.cost, None, "omitted fields are cleared");
    assert!(updated.is_published);

    assert_eq!(ProductRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attribute_detail_embeds_name_and_value(pool: PgPool) {
    seed_attribute(&pool).await;

    let detail = AttributeRepo::find_detail(&pool, 1).await.unwrap().unwrap();
    assert_eq!(detail.attribute_name.name.as_deref(), Some("Barva"));
    assert_eq!(detail.attribute_value.value, "modrá");

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["AttributeName"]["kod"], "color");
    assert_eq!(json["AttributeValue"]["hodnota"], "modrá");
    assert!(json.get("nazev_atributu_id").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_links_compose_details(pool: PgPool) {
    seed_attribute(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    ProductRepo::upsert(&mut conn, &new_product(3, "Lamp")).await.unwrap();
    ImageRepo::upsert(&mut conn, &new_image(4)).await.unwrap();

    ProductAttributesRepo::upsert(
        &mut conn,
        &ProductAttributesRecord {
            id: 1,
            attribute_id: 1,
            product_id: 3,
        },
    )
    .await
    .unwrap();
    ProductImageRepo::upsert(
        &mut conn,
        &ProductImageRecord {
            id: 1,
            product_id: 3,
            image_id: 4,
            name: Some("front".into()),
        },
    )
    .await
    .unwrap();

    let link = ProductAttributesRepo::find_detail(&pool, 1).await.unwrap().unwrap();
    assert_eq!(link.product.id, 3);
    assert_eq!(link.attribute.attribute_name.id, 1);

    let image = ProductImageRepo::find_detail(&pool, 1).await.unwrap().unwrap();
    assert_eq!(image.name.as_deref(), Some("front"));
    assert_eq!(image.image.image, "https://cdn.example.com/4.jpg");
    assert_eq!(image.product.name.as_deref(), Some("Lamp"));
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_upsert_replaces_links(pool: PgPool) {
    seed_attribute(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    for id in [1, 2, 3] {
        ProductRepo::upsert(&mut conn, &new_product(id, "P")).await.unwrap();
    }

    let catalog = CatalogRepo::upsert(
        &mut conn,
        &CatalogRecord {
            id: 1,
            name: Some("Spring".into()),
            image_id: None,
            product_ids: vec![3, 1],
            attribute_ids: Some(vec![1]),
        },
    )
    .await
    .unwrap();
    assert_eq!(catalog.product_ids, vec![1, 3]);
    assert_eq!(catalog.attribute_ids, vec![1]);

    let catalog = CatalogRepo::upsert(
        &mut conn,
        &CatalogRecord {
            id: 1,
            name: Some("Spring".into()),
            image_id: None,
            product_ids: vec![2],
            attribute_ids: Some(Vec::new()),
        },
    )
    .await
    .unwrap();
    assert_eq!(catalog.product_ids, vec![2]);
    assert!(catalog.attribute_ids.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_upsert_without_attribute_set_keeps_links(pool: PgPool) {
    seed_attribute(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    ProductRepo::upsert(&mut conn, &new_product(1, "P")).await.unwrap();

    let mut record = CatalogRecord {
        id: 1,
        name: Some("Spring".into()),
        image_id: None,
        product_ids: vec![1],
        attribute_ids: Some(vec![1]),
    };
    CatalogRepo::upsert(&mut conn, &record).await.unwrap();

    record.name = Some("Summer".into());
    record.attribute_ids = None;
    let catalog = CatalogRepo::upsert(&mut conn, &record).await.unwrap();

    assert_eq!(catalog.name.as_deref(), Some("Summer"));
    assert_eq!(catalog.attribute_ids, vec![1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_detail_embeds_image_attributes_and_products(pool: PgPool) {
    seed_attribute(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    ProductRepo::upsert(&mut conn, &new_product(5, "Chair")).await.unwrap();
    ImageRepo::upsert(&mut conn, &new_image(9)).await.unwrap();
    CatalogRepo::upsert(
        &mut conn,
        &CatalogRecord {
            id: 2,
            name: Some("Living room".into()),
            image_id: Some(9),
            product_ids: vec![5],
            attribute_ids: Some(vec![1]),
        },
    )
    .await
    .unwrap();

    let view = EntityRepo::find(&pool, EntityKind::Catalog, 2, Representation::Detail)
        .await
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["nazev"], "Living room");
    assert_eq!(json["Image"]["obrazek"], "https://cdn.example.com/9.jpg");
    assert_eq!(json["Products"][0]["nazev"], "Chair");
    assert_eq!(json["Products"][0]["cena"], "199.00");
    assert_eq!(json["Attributes"][0]["AttributeName"]["nazev"], "Barva");
    assert!(json.get("products_ids").is_none());

    let summary = EntityRepo::find(&pool, EntityKind::Catalog, 2, Representation::Summary)
        .await
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["obrazek_id"], 9);
    assert_eq!(json["products_ids"], serde_json::json!([5]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_without_image_has_null_image(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    CatalogRepo::upsert(
        &mut conn,
        &CatalogRecord {
            id: 1,
            name: None,
            image_id: None,
            product_ids: Vec::new(),
            attribute_ids: Some(Vec::new()),
        },
    )
    .await
    .unwrap();

    let detail = CatalogRepo::find_detail(&pool, 1).await.unwrap().unwrap();
    assert!(detail.image.is_none());
    assert!(detail.products.is_empty());
}

// ---------------------------------------------------------------------------
// Generic dispatch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_ids_reports_only_absent_rows(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    ProductRepo::upsert(&mut conn, &new_product(1, "A")).await.unwrap();
    ProductRepo::upsert(&mut conn, &new_product(3, "C")).await.unwrap();

    let missing = EntityRepo::missing_ids(&mut conn, EntityKind::Product, &[3, 2, 1, 8])
        .await
        .unwrap();
    assert_eq!(missing, vec![2, 8]);

    let none = EntityRepo::missing_ids(&mut conn, EntityKind::Image, &[])
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_returns_none_for_unknown_id(pool: PgPool) {
    for kind in EntityKind::ALL {
        let found = EntityRepo::find(&pool, kind, 999, Representation::Detail)
            .await
            .unwrap();
        assert!(found.is_none(), "{kind} 999 should not exist");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_of_plain_kind_matches_detail(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    ImageRepo::upsert(&mut conn, &new_image(2)).await.unwrap();

    let summary = EntityRepo::find(&pool, EntityKind::Image, 2, Representation::Summary)
        .await
        .unwrap();
    let detail = EntityRepo::find(&pool, EntityKind::Image, 2, Representation::Detail)
        .await
        .unwrap();
    assert!(matches!(summary, Some(EntityView::Image(_))));
    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        serde_json::to_value(&detail).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Transactions and cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dropped_transaction_rolls_back_upserts(pool: PgPool) {
    {
        let mut tx = pool.begin().await.unwrap();
        ProductRepo::upsert(&mut tx, &new_product(1, "Ghost")).await.unwrap();
        ImageRepo::upsert(&mut tx, &new_image(1)).await.unwrap();
        // Dropped without commit.
    }

    assert!(ProductRepo::list(&pool).await.unwrap().is_empty());
    assert!(ImageRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_attribute_name_cascades(pool: PgPool) {
    seed_attribute(&pool).await;

    sqlx::query("DELETE FROM attribute_name WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    assert!(AttributeNameRepo::find_by_id(&pool, 1).await.unwrap().is_none());
    assert!(AttributeRepo::find_by_id(&pool, 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dangling_foreign_key_is_rejected_by_the_database(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = AttributeRepo::upsert(
        &mut conn,
        &AttributeRecord {
            id: 1,
            attribute_name_id: 42,
            attribute_value_id: 42,
        },
    )
    .await;

    let err = result.unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, "23503");
}
