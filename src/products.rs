use crate::errors::StoreError;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::storage::{load_slot, persist_slot};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The client-side product library. Same persistence contract as the goal
/// store: read once at construction, written back after every effective
/// mutation, unknown ids silently ignored.
#[derive(Clone)]
pub struct ProductStore {
    path: PathBuf,
    products: Arc<Mutex<Vec<Product>>>,
}

impl ProductStore {
    pub async fn open(path: PathBuf) -> Self {
        let products: Vec<Product> = load_slot(&path).await;
        Self {
            path,
            products: Arc::new(Mutex::new(products)),
        }
    }

    /// Snapshot of the library in insertion order.
    pub async fn products(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    pub async fn product(&self, id: i64) -> Option<Product> {
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn add_product(&self, new_product: NewProduct) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        let product = Product {
            id: next_id(&products),
            name: new_product.name,
            category: new_product.category,
            brand: new_product.brand,
            key_ingredients: new_product.key_ingredients,
            frequency: new_product.frequency,
            notes: new_product.notes,
            active: new_product.active,
            started_date: new_product.started_date,
        };
        products.push(product);
        persist_slot(&self.path, &*products).await
    }

    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(brand) = patch.brand {
            product.brand = Some(brand);
        }
        if let Some(key_ingredients) = patch.key_ingredients {
            product.key_ingredients = Some(key_ingredients);
        }
        if let Some(frequency) = patch.frequency {
            product.frequency = Some(frequency);
        }
        if let Some(notes) = patch.notes {
            product.notes = Some(notes);
        }
        if let Some(active) = patch.active {
            product.active = active;
        }
        if let Some(started_date) = patch.started_date {
            product.started_date = Some(started_date);
        }
        persist_slot(&self.path, &*products).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(());
        }
        persist_slot(&self.path, &*products).await
    }

    /// Flip `active` on the matching product; every other field is left
    /// untouched.
    pub async fn toggle_active(&self, id: i64) -> Result<(), StoreError> {
        let mut products = self.products.lock().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        product.active = !product.active;
        persist_slot(&self.path, &*products).await
    }
}

fn next_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}
