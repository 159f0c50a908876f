//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

const COLLECTION_NAME: &str = "products";

/// Stored shape of a product: native ObjectId and BSON dates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    description: String,
    price: f64,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl ProductDocument {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.as_object_id(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            created_at: bson::DateTime::from_millis(product.created_at.timestamp_millis()),
            updated_at: bson::DateTime::from_millis(product.updated_at.timestamp_millis()),
        }
    }

    fn into_product(self) -> ProductResult<Product> {
        Ok(Product {
            id: ProductId::from(self.id),
            name: self.name,
            description: self.description,
            price: self.price,
            created_at: to_chrono(self.created_at)?,
            updated_at: to_chrono(self.updated_at)?,
        })
    }
}

fn to_chrono(value: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        ProductError::Internal(format!("stored timestamp out of range: {}", value))
    })
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Repository over the `products` collection of `db`
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoProductRepository::new(client.database("shop"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    fn id_filter(id: ProductId) -> Document {
        doc! { "_id": id.as_object_id() }
    }

    /// `$set` document for the supplied fields, always refreshing `updatedAt`
    fn build_update(input: &UpdateProduct, now: bson::DateTime) -> Document {
        let mut set = doc! { "updatedAt": now };

        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }

        if let Some(ref description) = input.description {
            set.insert("description", description.as_str());
        }

        if let Some(price) = input.price {
            set.insert("price", price);
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let document = ProductDocument::from_product(&Product::new(input));

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        document.into_product()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(ProductDocument::into_product).collect()
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(ProductDocument::into_product)
            .transpose()
    }

    #[instrument(skip(self, input), fields(product_id = %id))]
    async fn update(
        &self,
        id: ProductId,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let update = Self::build_update(&input, bson::DateTime::now());

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!("Product updated successfully");
        }
        updated.map(ProductDocument::into_product).transpose()
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?
            .is_some();

        if deleted {
            tracing::info!("Product deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
